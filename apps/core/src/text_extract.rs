//! Document text extraction.
//! Supports: TXT, PDF, DOCX

use crate::error::AppError;
use tracing::{info, warn};

/// Extract text content from raw document bytes based on the file extension.
///
/// The returned text is not checked for emptiness; the pipeline rejects blank documents.
pub fn extract_text(file_data: &[u8], file_name: &str) -> Result<String, AppError> {
    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    info!("Extracting text from document: {} (type: {})", file_name, extension);

    match extension.as_str() {
        "txt" => Ok(String::from_utf8_lossy(file_data).into_owned()),
        "pdf" => extract_pdf_text(file_data),
        "docx" => extract_docx_text(file_data),
        "" => Err(AppError::UnsupportedFormat(format!("{} (no extension)", file_name))),
        other => Err(AppError::UnsupportedFormat(format!(".{}", other))),
    }
}

/// Extract text from PDF file
fn extract_pdf_text(file_data: &[u8]) -> Result<String, AppError> {
    match pdf_extract::extract_text_from_mem(file_data) {
        Ok(text) => {
            let cleaned = clean_extracted_text(&text);
            info!("PDF extraction successful: {} characters", cleaned.len());
            Ok(cleaned)
        }
        Err(e) => {
            warn!("PDF extraction failed: {}", e);
            Err(AppError::UnreadableDocument(format!("Failed to extract PDF text: {}", e)))
        }
    }
}

/// Extract text from DOCX file, one line per non-empty paragraph
fn extract_docx_text(file_data: &[u8]) -> Result<String, AppError> {
    let docx = docx_rs::read_docx(file_data).map_err(|e| {
        warn!("DOCX extraction failed: {}", e);
        AppError::UnreadableDocument(format!("Failed to extract DOCX text: {}", e))
    })?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            docx_rs::DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
            _ => None,
        })
        .filter(|text| !text.trim().is_empty())
        .collect();

    let cleaned = clean_extracted_text(&paragraphs.join("\n"));
    info!("DOCX extraction successful: {} characters", cleaned.len());
    Ok(cleaned)
}

fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    para.children
        .iter()
        .filter_map(|pc| match pc {
            docx_rs::ParagraphChild::Run(run) => Some(
                run.children
                    .iter()
                    .filter_map(|rc| match rc {
                        docx_rs::RunChild::Text(t) => Some(t.text.as_str()),
                        _ => None,
                    })
                    .collect::<String>(),
            ),
            _ => None,
        })
        .collect()
}

/// Trim every line and drop blank ones
fn clean_extracted_text(text: &str) -> String {
    text.lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

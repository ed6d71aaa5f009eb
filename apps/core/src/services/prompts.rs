//! Prompt texts for the Gemini calls.

use chrono::NaiveDate;

/// System instruction for the tech-stack advisor
pub const TECH_STACK_SYSTEM_PROMPT: &str = "You are a senior software architect. Given an SRS, \
suggest a concise modern tech stack (frontend, backend, DB, infra, GenAI). Return ONLY a JSON \
object with 'tech_stack': string[].";

/// Characters of SRS text sent to the advisor
pub const TECH_STACK_INPUT_LIMIT: usize = 8000;

/// System instruction for the full project analysis, dated `today`
pub fn analysis_system_prompt(today: NaiveDate) -> String {
    format!(
        r#"You are a world-class software project analyst. Your task is to analyze the provided project requirements document and generate a comprehensive analysis.
The current date is {today}. You are based in India; quote costs in INR.

Your output MUST be a single, minified JSON object with the following structure:
{{
  "projectName": "A concise project name inferred from the document",
  "projectSummary": "A brief, one-paragraph summary of the project's goals",
  "techStack": {{
    "frontend": {{ "name": "e.g., Next.js", "reason": "Why this is a good choice for the project." }},
    "backend": {{ "name": "e.g., FastAPI (Python)", "reason": "Why this is a good choice for the project." }},
    "database": {{ "name": "e.g., PostgreSQL", "reason": "Why this is a good choice for the project." }},
    "deployment": {{ "name": "e.g., Vercel & AWS EC2", "reason": "Why this is a good choice for the project." }}
  }},
  "estimation": {{
    "functionPoints": {{
      "totalFP": "Estimated total function points (e.g., 250)",
      "analysis": "Brief explanation of how function points were derived from the requirements."
    }},
    "cocomo": {{
      "model": "Basic",
      "projectType": "Semi-detached (for a typical business application)",
      "effortMonths": "Calculated effort in person-months (e.g., 25)",
      "developmentTimeMonths": "Calculated development time in months (e.g., 6)",
      "personnelRequired": "Calculated number of personnel required (e.g., 4)"
    }}
  }},
  "costEstimation": {{
    "currency": "INR",
    "personnelCost": "Estimated cost for development team per month.",
    "infrastructureCost": "Estimated monthly cost for servers, databases, etc.",
    "totalProjectCost": "Total estimated cost for the project duration.",
    "breakdown": "A brief explanation of the cost components."
  }},
  "riskAnalysis": [
    {{ "risk": "Technical Debt", "mitigation": "Adopt a modular architecture and conduct regular code reviews." }},
    {{ "risk": "Scope Creep", "mitigation": "Implement a strict change control process and clear project milestones." }}
  ]
}}"#,
        today = today.format("%A, %B %-d, %Y")
    )
}

/// The SRS text cut to at most `limit` characters, on a char boundary
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => &text[..cut],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_is_dated() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 27).unwrap();
        let prompt = analysis_system_prompt(date);
        assert!(prompt.contains("Saturday, September 27, 2025"));
        assert!(prompt.contains("\"projectName\""));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("short", 100), "short");
    }
}

// SRS Estimator entry point
// Reads a requirements document and prints its estimate as JSON.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use srs_estimator_core::config::AppConfig;
use srs_estimator_core::estimation::{CocomoMode, EntityCapability, EstimationPipeline};
use srs_estimator_core::services::GeminiClient;
use srs_estimator_core::{text_extract, weights_store};

#[derive(Parser)]
#[command(name = "srs-estimator", version, about = "Estimate effort and cost from an SRS document")]
struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a .txt, .pdf or .docx requirements document
    Analyze(AnalyzeArgs),
    /// Inspect or tune the effort predictor's weights
    Weights {
        #[command(subcommand)]
        action: WeightsAction,
    },
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Document to analyze
    file: PathBuf,

    /// COCOMO mode: organic, semidetached or embedded
    #[arg(long)]
    mode: Option<CocomoMode>,

    /// Personnel rate in USD per person-month
    #[arg(long)]
    rate: Option<f64>,

    /// Number of keywords to report
    #[arg(long)]
    top_k: Option<usize>,

    /// Request a full project analysis from the generative model
    #[arg(long)]
    ai: bool,

    /// Request a tech-stack suggestion
    #[arg(long)]
    tech_stack: bool,

    /// Skip named-entity recognition
    #[arg(long)]
    no_entities: bool,

    /// Print single-line JSON
    #[arg(long)]
    compact: bool,
}

#[derive(Subcommand)]
enum WeightsAction {
    /// Print the stored weights
    Show,
    /// Set one weight
    Set {
        name: String,
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    /// Restore the default weights
    Reset,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn analyze(config: &AppConfig, args: AnalyzeArgs) -> Result<ExitCode> {
    let bytes = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let file_name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let text = text_extract::extract_text(&bytes, &file_name)?;

    let pool = weights_store::init_store(&config.database_url).await?;
    let weights = weights_store::load_or_seed(&pool).await?;

    let recognizer = if args.no_entities {
        EntityCapability::Unavailable
    } else {
        EntityCapability::resolve(config.entity_recognizer)
    };

    let mut options = config.estimation_options();
    options.mode = args.mode.unwrap_or(options.mode);
    options.rate_per_pm_usd = args.rate.unwrap_or(options.rate_per_pm_usd);
    options.top_k = args.top_k.unwrap_or(options.top_k);
    options.request_ai_analysis = args.ai;
    options.request_tech_stack = args.tech_stack;

    let pipeline = EstimationPipeline::new(options, weights, Arc::new(recognizer))?
        .with_service_timeout(config.gemini.timeout);
    let gemini = GeminiClient::new(&config.gemini)?;

    let result = pipeline.analyze(&text, Some(&gemini), Some(&gemini)).await?;
    let json = if args.compact {
        serde_json::to_string(&result)?
    } else {
        serde_json::to_string_pretty(&result)?
    };
    println!("{}", json);

    if result.ai_analysis.is_failure() {
        error!("AI analysis was requested but not delivered: {:?}", result.ai_analysis);
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}

async fn weights(config: &AppConfig, action: WeightsAction) -> Result<ExitCode> {
    let pool = weights_store::init_store(&config.database_url).await?;
    let weights = match action {
        WeightsAction::Show => weights_store::load_or_seed(&pool).await?,
        WeightsAction::Set { name, value } => weights_store::set_weight(&pool, &name, value).await?,
        WeightsAction::Reset => weights_store::reset_weights(&pool).await?,
    };
    println!("{}", serde_json::to_string_pretty(&weights)?);
    Ok(ExitCode::SUCCESS)
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = AppConfig::load()?;
    match cli.command {
        Command::Analyze(args) => analyze(&config, args).await,
        Command::Weights { action } => weights(&config, action).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);
    info!("srs-estimator {}", env!("CARGO_PKG_VERSION"));

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

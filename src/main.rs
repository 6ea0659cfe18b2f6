// moa - policy-proposal Q&A assistant
// Main entry point
//
// Startup order mirrors the error taxonomy: credential, corpus, model
// resolution are all fatal before chat is enabled; everything after that
// is recoverable inside the REPL.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use moa::cli::Repl;
use moa::config::load_config;
use moa::corpus::CorpusLoader;
use moa::gemini::{GeminiClient, GenerationParams};
use moa::logging::TranscriptLogger;
use moa::resolver::{self, ModelStrategy};
use moa::responder::Responder;

#[derive(Debug, Parser)]
#[command(name = "moa", about = "정책 제안 챗봇 - chat over a spreadsheet of policy proposals")]
struct Args {
    /// Proposal spreadsheet (.xlsx, .xls, .ods or .csv)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Use this model id, overriding the configured strategy
    #[arg(long)]
    model: Option<String>,

    /// Discover a model from the backend listing instead of a fixed id
    #[arg(long, conflicts_with = "model")]
    auto_model: bool,

    /// Disable transcript logging under ~/.moa/logs
    #[arg(long)]
    no_transcript: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    // Load configuration (fatal without a credential)
    let mut config = load_config()?;
    if let Some(data) = args.data {
        config.corpus_path = data;
    }
    if let Some(model) = args.model {
        config.model = ModelStrategy::Fixed(model);
    } else if args.auto_model {
        config.model = ModelStrategy::Auto {
            priority: resolver::default_priority(),
        };
    }

    // Load the proposal corpus once; it is read-only for the rest of
    // the process.
    let loader = CorpusLoader::new();
    let context = loader
        .load(&config.corpus_path)
        .context("❌ 데이터 로드 오류")?;

    let client = GeminiClient::new(config.api_key.clone())
        .context("failed to create Gemini client")?
        .with_retry_enabled(config.retry_enabled);

    // Resolve the backend model (fatal if nothing usable is offered)
    let model_id = match &config.model {
        ModelStrategy::Fixed(id) => id.clone(),
        ModelStrategy::Auto { priority } => {
            let models = client
                .list_models()
                .await
                .context("failed to list backend models")?;
            resolver::resolve(&models, priority)?
        }
    };
    eprintln!("✓ 모델: {}", model_id);

    let responder = Responder::new(client, model_id, context).with_params(GenerationParams {
        max_output_tokens: config.max_output_tokens,
        temperature: config.temperature,
    });

    // Transcript logging is best-effort observability
    let transcript = if args.no_transcript {
        None
    } else {
        match dirs::home_dir()
            .map(|home| home.join(".moa").join("logs"))
            .map(|dir| TranscriptLogger::new(&dir))
        {
            Some(Ok(logger)) => Some(logger),
            Some(Err(e)) => {
                tracing::warn!("Transcript logging disabled: {}", e);
                None
            }
            None => None,
        }
    };

    let mut repl = Repl::new(responder, transcript);
    repl.run().await
}

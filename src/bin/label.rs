use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use reviewlens::backends::Groq;
use reviewlens::config::{Settings, GROQ_API_KEY_ENV};
use reviewlens::dataset::ReviewTable;
use reviewlens::labeler::{
    label_all, CLASSIFIER_MAX_TOKENS, CLASSIFIER_TEMPERATURE, SENTIMENT_SYSTEM_PROMPT,
};

/// Command line arguments for the batch labeler
#[derive(Parser)]
#[clap(
    name = "label",
    about = "Classify the sentiment of every review in a CSV table"
)]
struct CliArgs {
    /// Input table of cleaned reviews
    #[arg(long, default_value = "data/cleaned_reviews.csv")]
    input: PathBuf,

    /// Output path for the labeled table (overwritten if present)
    #[arg(long, default_value = "data/labeled_reviews.csv")]
    output: PathBuf,

    /// Model identifier, overriding the environment
    #[arg(long)]
    model: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 60)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    reviewlens::init_logging();
    let args = CliArgs::parse();
    let settings = Settings::from_env();

    let api_key = match settings.groq_api_key {
        Some(key) => key,
        None => {
            log::error!(
                "{GROQ_API_KEY_ENV} environment variable not found. \
                 Set it before running the labeler."
            );
            return ExitCode::FAILURE;
        }
    };

    // Missing or unreadable input is fatal before any work is done.
    let mut table = match ReviewTable::load(&args.input) {
        Ok(table) => table,
        Err(e) => {
            log::error!("{e}. Produce the cleaned table first.");
            return ExitCode::FAILURE;
        }
    };

    let texts = match table.feedback_texts() {
        Ok(texts) => texts,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let model = args.model.unwrap_or(settings.groq_model);
    log::info!("Classifier initialized (model: {model})");

    let classifier = Groq::new(
        api_key,
        None,
        model,
        Some(CLASSIFIER_MAX_TOKENS),
        Some(CLASSIFIER_TEMPERATURE),
        Some(args.timeout),
        Some(SENTIMENT_SYSTEM_PROMPT.to_string()),
    );

    log::info!("Running sentiment analysis over {} reviews...", texts.len());
    let labels = label_all(&classifier, &texts).await;

    if let Err(e) = table.set_labels(&labels) {
        log::error!("{e}");
        return ExitCode::FAILURE;
    }
    if let Err(e) = table.save(&args.output) {
        log::error!("{e}");
        return ExitCode::FAILURE;
    }

    log::info!(
        "Sentiment analysis results saved to {}",
        args.output.display()
    );
    ExitCode::SUCCESS
}

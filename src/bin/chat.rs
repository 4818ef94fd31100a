use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use reviewlens::api::Server;
use reviewlens::assistant::{Assistant, REMOTE_MAX_TOKENS};
use reviewlens::backends::{Groq, LocalModel};
use reviewlens::chat::ChatProvider;
use reviewlens::completion::CompletionProvider;
use reviewlens::config::{Settings, GROQ_API_KEY_ENV};
use reviewlens::dataset::CachedTable;

/// Command line arguments for the chat assistant server
#[derive(Parser)]
#[clap(
    name = "chat",
    about = "Serve an interactive chat page over the labeled review table"
)]
struct CliArgs {
    /// Labeled table produced by the labeler
    #[arg(long, default_value = "data/labeled_reviews.csv")]
    data: PathBuf,

    /// Address to bind the web surface to
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 120)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    reviewlens::init_logging();
    let args = CliArgs::parse();
    let settings = Settings::from_env();

    // Fail closed at startup: without the labeled table there is nothing to
    // chat about, and no question is ever accepted.
    let table = match CachedTable::load(&args.data) {
        Ok(table) => table,
        Err(e) => {
            log::error!("{e}. Run the labeler first to produce the labeled table.");
            return ExitCode::FAILURE;
        }
    };

    // Each backend initializes independently; a failure only removes that
    // backend from the selectable list.
    let remote: Option<Box<dyn ChatProvider>> = match settings.groq_api_key {
        Some(key) => {
            log::info!("Remote backend enabled (model: {})", settings.groq_model);
            Some(Box::new(Groq::new(
                key,
                None,
                settings.groq_model.clone(),
                Some(REMOTE_MAX_TOKENS),
                None,
                Some(args.timeout),
                None,
            )))
        }
        None => {
            log::warn!("{GROQ_API_KEY_ENV} not set; remote backend disabled");
            None
        }
    };

    let local_model = LocalModel::new(
        settings.local_model_url.clone(),
        settings.local_model_name.clone(),
        Some(args.timeout),
    );
    let local: Option<Box<dyn CompletionProvider>> = match local_model.probe().await {
        Ok(()) => {
            log::info!(
                "Local backend enabled (model: {} at {})",
                settings.local_model_name,
                settings.local_model_url
            );
            Some(Box::new(local_model))
        }
        Err(e) => {
            log::warn!("Local backend disabled: {e}");
            None
        }
    };

    if remote.is_none() && local.is_none() {
        log::warn!("No generation backend is available; the page will refuse questions");
    }

    let assistant = Assistant::new(remote, local, table);
    if let Err(e) = Server::new(assistant).run(&args.addr).await {
        log::error!("{e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

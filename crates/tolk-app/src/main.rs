use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tolk_session::{SessionOptions, TranslationSession};
use tolk_translator::HttpTranslator;
use tracing_subscriber::EnvFilter;

pub mod controller;
pub mod events;
pub mod profile;
pub mod ui;

use self::controller::AppController;
use self::ui::OutputFormat;

/// Interactive translator: type a line, get it translated
#[derive(Parser, Debug)]
#[command(name = "tolk", version)]
struct Cli {
    /// JSON profile to load instead of environment defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Provider base URL
    #[arg(long)]
    api_url: Option<String>,
    /// Source language code
    #[arg(long, short)]
    source: Option<String>,
    /// Target language code
    #[arg(long, short)]
    target: Option<String>,
    /// Provider call timeout, at least 1
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_ms: Option<u64>,
    /// Print session events as JSON lines
    #[arg(long)]
    json: bool,
    /// Force JSON log output
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let mut config = profile::load_config(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.translator.api_url = url;
    }
    if let Some(source) = cli.source {
        config.translator.source_language = source;
    }
    if let Some(target) = cli.target {
        config.translator.target_language = target;
    }
    if let Some(ms) = cli.timeout_ms {
        config.translator.timeout_ms = ms;
    }

    init_tracing(&config.log_filter, cli.log_json);

    let translator = Arc::new(HttpTranslator::new(&config.translator.api_url));
    tracing::info!("Using provider at {}", translator.endpoint());

    let session = TranslationSession::new(translator, SessionOptions::from(&config.translator));
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let controller = AppController::new(session, format);
    let mut tasks = controller.spawn_tasks();

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::debug!("task finished"),
                Ok(Err(e)) => tracing::error!("task failed: {e:#}"),
                Err(e) => tracing::error!("task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("task failed during shutdown: {e:#}"),
            Err(e) => tracing::error!("task panicked during shutdown: {e}"),
        }
    }

    Ok(())
}

/// Logs go to stderr, stdout carries translations
fn init_tracing(default_filter: &str, force_json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if force_json || !atty::is(atty::Stream::Stderr) {
        builder.json().init();
    } else {
        builder.init();
    }
}

//! confab CLI: terminal chat client entry point.

use clap::Parser;
use confab_engine::{CompletionClient, Config};
use std::path::{Path, PathBuf};

/// Terminal chat client for OpenAI-compatible completion APIs
#[derive(Parser)]
#[command(name = "confab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Model identifier override
    #[arg(long)]
    model: Option<String>,

    /// Completions endpoint override
    #[arg(long)]
    api_url: Option<String>,

    /// Sampling temperature override
    #[arg(long)]
    temperature: Option<f32>,

    /// Config file (defaults to ~/.config/confab/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Diagnostic log file (defaults to ~/.config/confab/confab.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.log_file.as_deref());

    let mut config = match &cli.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config: {e}");
                std::process::exit(1);
            }
        },
        None => Config::load_or_default(),
    };

    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(temperature) = cli.temperature {
        config.temperature = temperature;
    }

    let Some(api_key) = Config::api_key_from_env() else {
        eprintln!("No API key found. Set CONFAB_API_KEY or OPENAI_API_KEY.");
        std::process::exit(1);
    };

    let client = CompletionClient::new(&config, api_key);

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    if let Err(e) = rt.block_on(confab_tui::run_tui(&config, client)) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Initialize the diagnostic log.
///
/// The TUI owns the terminal, so logs go to a file. When no file can be
/// opened, logging is simply disabled.
fn init_tracing(log_file: Option<&Path>) {
    use tracing_subscriber::EnvFilter;

    let path = match log_file {
        Some(path) => path.to_path_buf(),
        None => match Config::default_log_path() {
            Some(path) => path,
            None => return,
        },
    };

    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let Ok(file) = std::fs::OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
}

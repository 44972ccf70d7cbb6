//! Tunelog CLI - find the music in a YouTube watch history.

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tunelog_cli::commands;
use tunelog_cli::{Cli, Command, Config, Formatter};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> tunelog_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Load or create config
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::path()?,
    };
    let config = Config::load_or_init(&config_path)?;
    debug!("Using configuration at {}", config_path.display());

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    let api_key = cli.api_key.as_deref();

    match cli.command {
        Command::Analyze(args) => {
            commands::execute_analyze(args, &config, api_key, &formatter).await?;
        }
        Command::Show(args) => {
            commands::execute_show(args, &formatter).await?;
        }
        Command::Recap(args) => {
            commands::execute_recap(args, &config, api_key, &formatter).await?;
        }
        Command::Inspect(args) => {
            commands::execute_inspect(args, &config, &formatter).await?;
        }
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, &formatter).await?;
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

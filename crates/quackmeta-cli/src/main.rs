//! QuackMetadata CLI - Extract structured metadata from text files.

use clap::Parser;
use quackmeta_cli::commands;
use quackmeta_cli::{Cli, CliFormat, Command, Config, Formatter, OutputFormat};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> quackmeta_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;

    init_logging(cli.debug, &config.settings.log_level);

    let format = match cli.format {
        Some(CliFormat::Json) => OutputFormat::Json,
        Some(CliFormat::Table) => OutputFormat::Table,
        None => config.settings.format,
    };
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Extract(args) => commands::execute_extract(args, &config, &formatter)?,
        Command::Status => {
            let config_path = match cli.config {
                Some(path) => Some(path),
                None => Config::default_path().ok().filter(|p| p.exists()),
            };
            commands::execute_status(&config, config_path.as_deref(), &formatter)?
        }
    }

    Ok(())
}

/// Log to stderr; RUST_LOG wins over the configured level
fn init_logging(debug: bool, configured_level: &str) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured_level))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

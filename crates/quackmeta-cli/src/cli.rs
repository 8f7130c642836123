//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// QuackMetadata - Extract structured metadata from text files.
///
/// Files can be read locally or downloaded from Google Drive; results are
/// written as JSON and, for Drive inputs, uploaded next to the source.
#[derive(Debug, Parser)]
#[command(name = "quackmeta")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "QUACKMETA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for detailed views
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract metadata from a text file
    ///
    /// INPUT can be a local file path or a Google Drive file ID.
    Extract(ExtractArgs),

    /// Show the configured LLM backend and Drive access
    Status,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Local file path or Google Drive file ID
    pub input: String,

    /// Output path for metadata JSON file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to custom prompt template (.mustache file)
    #[arg(long)]
    pub prompt_template: Option<PathBuf>,

    /// Number of LLM attempts (1-10)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=10))]
    pub retries: Option<u32>,

    /// Don't upload metadata to Google Drive, just extract and print
    #[arg(long)]
    pub dry_run: bool,

    /// Print detailed processing information
    #[arg(short, long)]
    pub verbose: bool,

    /// Use the simulated LLM instead of a real model
    #[arg(long)]
    pub mock: bool,

    /// Print the full metadata record after the card
    #[arg(long)]
    pub show_metadata: bool,
}

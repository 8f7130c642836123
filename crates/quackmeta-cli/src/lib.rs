//! QuackMetadata CLI library.
//!
//! Configuration management, command execution and output formatting for the
//! `quackmeta` command-line tool.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, CliFormat, Command, ExtractArgs};
pub use config::{Config, OutputFormat};
pub use error::{CliError, Result};
pub use output::Formatter;

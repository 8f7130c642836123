//! Error types for the CLI application.

use quackmeta_drive::StorageError;
use quackmeta_llm::LlmError;
use quackmeta_processor::ProcessorError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The processor could not start
    #[error("Failed to initialize metadata processor: {0}")]
    Init(ProcessorError),

    /// Processing the input failed
    #[error("Failed to extract metadata: {0}")]
    Extract(ProcessorError),

    /// LLM backend could not be constructed
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// Drive client could not be constructed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

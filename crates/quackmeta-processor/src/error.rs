//! Error types for the Processor

use quackmeta_extractor::ExtractorError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while processing a document
#[derive(Error, Debug)]
pub enum ProcessorError {
    /// Designator is neither an existing file nor a plausible Drive id
    #[error("File not found: {0}")]
    NotFound(String),

    /// Designator exists but is not a regular file
    #[error("Not a file: {}", .0.display())]
    NotAFile(PathBuf),

    /// Input could not be read as UTF-8 text
    #[error("Failed to read file {}: {reason}", path.display())]
    Read {
        /// File that failed
        path: PathBuf,
        /// Underlying error text
        reason: String,
    },

    /// Metadata could not be written
    #[error("Failed to write metadata file {}: {reason}", path.display())]
    Write {
        /// Destination that failed
        path: PathBuf,
        /// Underlying error text
        reason: String,
    },

    /// Extraction failed
    #[error(transparent)]
    Extraction(#[from] ExtractorError),

    /// Remote storage failed
    #[error("{0}")]
    Storage(String),

    /// Another live process holds the working-directory lock
    #[error("Initialization error: another process is already running (lock file {}, held by {holder})", path.display())]
    LockConflict {
        /// Lock file path
        path: PathBuf,
        /// Content of the lock file, normally a process id
        holder: String,
    },

    /// Processor could not be initialized
    #[error("Initialization error: {0}")]
    Init(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

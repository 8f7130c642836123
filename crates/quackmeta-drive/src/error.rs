//! Error types for remote storage

use thiserror::Error;

/// Errors that can occur while talking to Google Drive
#[derive(Error, Debug)]
pub enum StorageError {
    /// Missing, expired or rejected access token
    #[error("Drive access token error: {0}")]
    Credential(String),

    /// Network or API communication error
    #[error("Drive request failed: {0}")]
    Http(String),

    /// The file id does not exist or is not visible
    #[error("Drive file not found: {0}")]
    NotFound(String),

    /// Local filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Response body did not have the expected shape
    #[error("Invalid Drive response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for StorageError {
    fn from(e: reqwest::Error) -> Self {
        StorageError::Http(e.to_string())
    }
}

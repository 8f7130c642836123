//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{ChatMessage, ChatOptions};
use std::path::{Path, PathBuf};

/// Trait for chat-style language model backends
///
/// Implemented by the infrastructure layer (quackmeta-llm)
pub trait ChatBackend {
    /// Error type for chat operations
    type Error: std::fmt::Display;

    /// Send the full transcript and return the model's reply text
    fn chat(&self, messages: &[ChatMessage], options: &ChatOptions) -> Result<String, Self::Error>;

    /// Model or backend name, for logs and result metadata
    fn model_name(&self) -> &str;

    /// Whether this backend produces simulated rather than real output
    fn is_simulated(&self) -> bool {
        false
    }
}

/// Descriptive information about a remote file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFileInfo {
    /// Display name of the file
    pub name: String,

    /// Folder the file lives in, if the store reports one
    pub parent: Option<String>,
}

/// A remote file copied to local disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    /// Where the content was written
    pub path: PathBuf,

    /// Name and parent of the remote file
    pub info: RemoteFileInfo,
}

/// Trait for remote object storage
///
/// Implemented by the infrastructure layer (quackmeta-drive)
pub trait RemoteStorage {
    /// Error type for storage operations
    type Error: std::fmt::Display;

    /// Download a file into `dest_dir`, returning the local copy and its remote info
    fn download(&self, id: &str, dest_dir: &Path) -> Result<DownloadedFile, Self::Error>;

    /// Look up name and parent folder of a file
    fn get_info(&self, id: &str) -> Result<RemoteFileInfo, Self::Error>;

    /// Upload a local file into `parent` (or the store root), returning its new id
    fn upload(&self, local_path: &Path, parent: Option<&str>) -> Result<String, Self::Error>;
}

/// Markers that identify a credential problem in provider error text
const CREDENTIAL_MARKERS: [&str; 5] = [
    "api key",
    "api_key",
    "unauthorized",
    "authentication",
    "access token",
];

/// Check whether an error message signals a missing or invalid credential
///
/// # Examples
///
/// ```
/// use quackmeta_domain::traits::mentions_credential;
///
/// assert!(mentions_credential("Incorrect API key provided"));
/// assert!(!mentions_credential("connection reset by peer"));
/// ```
pub fn mentions_credential(message: &str) -> bool {
    let lower = message.to_lowercase();
    CREDENTIAL_MARKERS.iter().any(|marker| lower.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_markers() {
        assert!(mentions_credential("LLM API key not provided"));
        assert!(mentions_credential("HTTP 401 Unauthorized"));
        assert!(mentions_credential("invalid_api_key"));
        assert!(!mentions_credential("HTTP 503 Service Unavailable"));
    }
}

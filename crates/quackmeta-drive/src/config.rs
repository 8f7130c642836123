//! Configuration for the Drive client

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default metadata API base
pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// Default upload API base
pub const DEFAULT_UPLOAD_BASE: &str = "https://www.googleapis.com/upload/drive/v3";

/// Connection settings for Google Drive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    /// Base URL of the files API
    pub api_base: String,

    /// Base URL of the upload API
    pub upload_base: String,

    /// OAuth bearer token
    pub access_token: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl DriveConfig {
    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            upload_base: DEFAULT_UPLOAD_BASE.to_string(),
            access_token: None,
            timeout_secs: 60,
        }
    }
}

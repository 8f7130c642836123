//! Configuration for the Processor

use crate::error::ProcessorError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the Processor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Directory for metadata files when no output path is given
    pub output_dir: PathBuf,

    /// Scratch area for downloads; also holds the lock file
    pub temp_dir: PathBuf,

    /// Age after which an existing lock is considered abandoned (seconds)
    pub lock_stale_after_secs: u64,

    /// Lock file name inside `temp_dir`
    pub lock_file_name: String,
}

impl ProcessorConfig {
    /// Get the lock staleness window as a Duration
    pub fn lock_stale_after(&self) -> Duration {
        Duration::from_secs(self.lock_stale_after_secs)
    }

    /// Full path of the lock file
    pub fn lock_path(&self) -> PathBuf {
        self.temp_dir.join(&self.lock_file_name)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ProcessorError> {
        if self.output_dir.as_os_str().is_empty() || self.temp_dir.as_os_str().is_empty() {
            return Err(ProcessorError::Config(
                "output_dir and temp_dir must not be empty".to_string(),
            ));
        }
        if self.lock_file_name.trim().is_empty() || self.lock_file_name.contains(['/', '\\']) {
            return Err(ProcessorError::Config(
                "lock_file_name must be a plain file name".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./output"),
            temp_dir: PathBuf::from("./temp"),
            lock_stale_after_secs: 600,
            lock_file_name: ".quackmeta.lock".to_string(),
        }
    }
}

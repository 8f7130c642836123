//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use quackmeta_drive::DriveConfig;
use quackmeta_extractor::ExtractorConfig;
use quackmeta_llm::openai::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use quackmeta_processor::ProcessorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable holding the LLM API key
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";

/// Environment variable overriding the LLM endpoint
pub const ENV_LLM_ENDPOINT: &str = "QUACKMETA_LLM_ENDPOINT";

/// Environment variable overriding the LLM model
pub const ENV_LLM_MODEL: &str = "QUACKMETA_LLM_MODEL";

/// Environment variable holding the Drive access token
pub const ENV_DRIVE_TOKEN: &str = "GOOGLE_DRIVE_ACCESS_TOKEN";

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// LLM backend selection
    #[serde(default)]
    pub llm: LlmSettings,

    /// Google Drive access
    #[serde(default)]
    pub drive: DriveConfig,

    /// Retry engine tuning
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Working directories and locking
    #[serde(default)]
    pub processor: ProcessorConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Which chat backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmBackendKind {
    /// OpenAI-compatible HTTP API
    #[default]
    OpenAi,
    /// Simulated backend returning canned metadata
    Mock,
}

impl LlmBackendKind {
    /// Get the configuration name of the backend
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmBackendKind::OpenAi => "openai",
            LlmBackendKind::Mock => "mock",
        }
    }
}

/// LLM backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Backend to use
    pub provider: LlmBackendKind,

    /// API base URL
    pub endpoint: String,

    /// Model name
    pub model: String,

    /// API key; usually supplied through the environment instead
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Format for detailed views
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Log filter used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".quackmeta").join("config.toml"))
    }

    /// Load configuration, then apply environment overrides.
    ///
    /// An explicitly given file must exist; the default file is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(CliError::Config(format!(
                        "Configuration file not found: {}",
                        path.display()
                    )));
                }
                Self::load_from(path)?
            }
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::load_from(&path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Overlay values from the environment.
    ///
    /// Blank variables are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = var(ENV_API_KEY) {
            self.llm.api_key = Some(key);
        }
        if let Some(endpoint) = var(ENV_LLM_ENDPOINT) {
            self.llm.endpoint = endpoint;
        }
        if let Some(model) = var(ENV_LLM_MODEL) {
            self.llm.model = model;
        }
        if let Some(token) = var(ENV_DRIVE_TOKEN) {
            self.drive.access_token = Some(token);
        }
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.extractor
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;
        self.processor
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;
        if self.llm.provider == LlmBackendKind::OpenAi && self.llm.endpoint.trim().is_empty() {
            return Err(CliError::Config("llm.endpoint must not be empty".into()));
        }
        Ok(())
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: LlmBackendKind::OpenAi,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            log_level: default_log_level(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.llm.provider, LlmBackendKind::OpenAi);
        assert_eq!(config.llm.model, DEFAULT_MODEL);
        assert_eq!(config.extractor.retries, 3);
        assert_eq!(config.processor.output_dir, PathBuf::from("./output"));
        assert!(config.settings.color);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_sections() {
        let config: Config = toml::from_str(
            r#"
            [llm]
            provider = "mock"
            model = "llama3"

            [extractor]
            retries = 5

            [processor]
            output_dir = "/data/meta"

            [settings]
            color = false
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.llm.provider, LlmBackendKind::Mock);
        assert_eq!(config.llm.model, "llama3");
        assert_eq!(config.llm.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.extractor.retries, 5);
        assert_eq!(config.processor.output_dir, PathBuf::from("/data/meta"));
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert!(!config.settings.color);
    }

    #[test]
    fn test_env_overrides() {
        let env = HashMap::from([
            (ENV_API_KEY, "sk-test"),
            (ENV_LLM_MODEL, "gpt-test"),
            (ENV_DRIVE_TOKEN, "ya29.token"),
            (ENV_LLM_ENDPOINT, "   "),
        ]);
        let mut config = Config::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.llm.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.llm.model, "gpt-test");
        assert_eq!(config.llm.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.drive.access_token.as_deref(), Some("ya29.token"));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(Some(dir.path().join("nope.toml").as_path()));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_invalid_retries_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[extractor]\nretries = 50\n").unwrap();
        assert!(matches!(Config::load(Some(path.as_path())), Err(CliError::Config(_))));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[llm]\nprovider = \"mock\"\n\n[processor]\ntemp_dir = \"/tmp/qm\"\n").unwrap();

        let loaded = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(loaded.llm.provider, LlmBackendKind::Mock);
        assert_eq!(loaded.processor.temp_dir, PathBuf::from("/tmp/qm"));
        assert_eq!(loaded.extractor.retries, 3);
    }
}

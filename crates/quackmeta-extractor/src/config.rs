//! Configuration for the Extractor

use crate::error::ExtractorError;
use quackmeta_domain::ChatOptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Largest retry budget accepted from configuration
pub const MAX_RETRIES: u32 = 10;

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Total LLM attempts per document (1..=10)
    pub retries: u32,

    /// Sampling temperature sent with every call
    pub temperature: f32,

    /// Output token ceiling sent with every call
    pub max_tokens: u32,

    /// Pause between a failed attempt and the next one (milliseconds)
    pub retry_delay_ms: u64,

    /// Template name used when no custom template is given
    pub template_name: String,

    /// Template category (sub-folder under `prompts/`)
    pub template_category: String,
}

impl ExtractorConfig {
    /// Get the retry pause as a Duration
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Sampling parameters for chat calls
    pub fn chat_options(&self) -> ChatOptions {
        ChatOptions {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ExtractorError> {
        if self.retries == 0 || self.retries > MAX_RETRIES {
            return Err(ExtractorError::Config(format!(
                "retries must be between 1 and {}",
                MAX_RETRIES
            )));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ExtractorError::Config(
                "temperature must be between 0.0 and 2.0".to_string(),
            ));
        }
        if self.max_tokens == 0 {
            return Err(ExtractorError::Config(
                "max_tokens must be greater than 0".to_string(),
            ));
        }
        if self.template_name.trim().is_empty() || self.template_category.trim().is_empty() {
            return Err(ExtractorError::Config(
                "template_name and template_category must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// Three attempts, one second apart, at low temperature
    fn default() -> Self {
        Self {
            retries: 3,
            temperature: 0.1,
            max_tokens: 2000,
            retry_delay_ms: 1000,
            template_name: "generic".to_string(),
            template_category: "metadata".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.retry_delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_invalid_retries() {
        let mut config = ExtractorConfig::default();
        config.retries = 0;
        assert!(config.validate().is_err());

        config.retries = MAX_RETRIES + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_max_tokens() {
        let mut config = ExtractorConfig::default();
        config.max_tokens = 0;
        assert!(matches!(config.validate(), Err(ExtractorError::Config(_))));
    }

    #[test]
    fn test_chat_options_follow_config() {
        let mut config = ExtractorConfig::default();
        config.temperature = 0.3;
        config.max_tokens = 512;
        let options = config.chat_options();
        assert_eq!(options.temperature, 0.3);
        assert_eq!(options.max_tokens, 512);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ExtractorConfig = toml::from_str("retries = 5").unwrap();
        assert_eq!(config.retries, 5);
        assert_eq!(config.max_tokens, 2000);
    }
}

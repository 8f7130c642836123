//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// The LLM rejected or lacks its credential; never retried
    #[error("LLM API key error: {0}. Please configure your API key.")]
    Credential(String),

    /// Every attempt failed before the model produced a reply
    #[error("Failed to get response from LLM after {attempts} attempts: {reason}")]
    LlmUnavailable {
        /// Attempts spent
        attempts: u32,
        /// Error text of the last failed call
        reason: String,
    },

    /// The model replied every time, but never with a valid record
    #[error("Failed to extract valid metadata after {attempts} attempts")]
    ExtractionFailed {
        /// Attempts spent
        attempts: u32,
    },

    /// No template file exists at the resolved location
    #[error("Template file not found: {0}")]
    TemplateNotFound(String),

    /// Template references a variable the context does not supply
    #[error("Failed to render template: {0}")]
    TemplateRender(String),

    /// Prompt could not be produced; raised before any LLM call
    #[error("Failed to render prompt: {0}")]
    PromptRender(String),

    /// Reply is not shaped like a metadata object
    #[error("Invalid metadata format: {0}")]
    InvalidFormat(String),

    /// Reply does not match the metadata schema
    #[error("Validation error: {0}")]
    Validation(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}

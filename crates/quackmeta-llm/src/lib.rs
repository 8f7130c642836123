//! QuackMetadata LLM Provider Layer
//!
//! Chat backend implementations of the `ChatBackend` trait from `quackmeta-domain`.
//!
//! # Providers
//!
//! - `ScriptedProvider`: Deterministic fixed-script double for tests and simulated mode
//! - `OpenAiProvider`: OpenAI-compatible `/chat/completions` integration
//!
//! The backend is chosen explicitly from configuration at startup. Nothing in
//! this crate silently swaps a real provider for a scripted one.
//!
//! # Examples
//!
//! ```
//! use quackmeta_domain::traits::ChatBackend;
//! use quackmeta_domain::{ChatMessage, ChatOptions};
//! use quackmeta_llm::ScriptedProvider;
//!
//! let provider = ScriptedProvider::new("Hello from LLM!");
//! let reply = provider
//!     .chat(&[ChatMessage::user("hi")], &ChatOptions::default())
//!     .unwrap();
//! assert_eq!(reply, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

pub mod openai;

use quackmeta_domain::traits::ChatBackend;
use quackmeta_domain::{ChatMessage, ChatOptions};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

pub use openai::OpenAiProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    /// Missing or rejected API credential
    #[error("API key error: {0}")]
    Credential(String),

    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// One scripted reaction of a `ScriptedProvider`
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptStep {
    /// Reply with this text
    Reply(String),

    /// Fail the call with this error
    Fail(LlmError),
}

/// Reply used by simulated mode
const SIMULATED_RESPONSE: &str = r#"```json
{
    "title": "Mock Document",
    "summary": "This is a mock summary generated because the LLM service is unavailable.",
    "author_style": "N/A (MockLLM)",
    "tone": "Neutral",
    "language": "English",
    "domain": "Testing",
    "estimated_date": null,
    "rarity": "🟢 Common",
    "author_profile": {
        "name": "Mock Author",
        "profession": "Test Writer",
        "writing_style": "Automated",
        "possible_age_range": "N/A",
        "location_guess": "Virtual Environment"
    }
}
```"#;

/// Fixed-script chat backend
///
/// Plays back its script one step per call. Once the script is exhausted the
/// last step repeats. Every transcript it receives is recorded so tests can
/// inspect exactly what the caller sent.
///
/// # Examples
///
/// ```
/// use quackmeta_domain::traits::ChatBackend;
/// use quackmeta_domain::{ChatMessage, ChatOptions};
/// use quackmeta_llm::{LlmError, ScriptStep, ScriptedProvider};
///
/// let provider = ScriptedProvider::from_steps(vec![
///     ScriptStep::Fail(LlmError::Communication("timeout".into())),
///     ScriptStep::Reply("second".into()),
/// ]);
/// let messages = [ChatMessage::user("prompt")];
/// assert!(provider.chat(&messages, &ChatOptions::default()).is_err());
/// assert_eq!(provider.chat(&messages, &ChatOptions::default()).unwrap(), "second");
/// assert_eq!(provider.call_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedProvider {
    script: Arc<Mutex<VecDeque<ScriptStep>>>,
    last_step: Arc<Mutex<ScriptStep>>,
    transcripts: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
    simulated: bool,
}

impl ScriptedProvider {
    /// Create a provider that answers every call with the same reply
    pub fn new(response: impl Into<String>) -> Self {
        Self::from_steps(vec![ScriptStep::Reply(response.into())])
    }

    /// Create a provider that replies with each response in turn
    pub fn from_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_steps(
            responses
                .into_iter()
                .map(|r| ScriptStep::Reply(r.into()))
                .collect(),
        )
    }

    /// Create a provider from an explicit script
    pub fn from_steps(steps: Vec<ScriptStep>) -> Self {
        let last = steps
            .last()
            .cloned()
            .unwrap_or_else(|| ScriptStep::Reply(String::new()));
        Self {
            script: Arc::new(Mutex::new(steps.into())),
            last_step: Arc::new(Mutex::new(last)),
            transcripts: Arc::new(Mutex::new(Vec::new())),
            simulated: false,
        }
    }

    /// Create the provider used for simulated mode
    ///
    /// It always returns a fenced, schema-conformant mock record and reports
    /// itself as simulated.
    pub fn simulated() -> Self {
        Self {
            simulated: true,
            ..Self::new(SIMULATED_RESPONSE)
        }
    }

    /// Get the number of times chat was called
    pub fn call_count(&self) -> usize {
        lock(&self.transcripts).len()
    }

    /// Get every transcript received, in call order
    pub fn transcripts(&self) -> Vec<Vec<ChatMessage>> {
        lock(&self.transcripts).clone()
    }

    /// Get the transcript of the most recent call
    pub fn last_transcript(&self) -> Option<Vec<ChatMessage>> {
        lock(&self.transcripts).last().cloned()
    }

    fn next_step(&self) -> ScriptStep {
        match lock(&self.script).pop_front() {
            Some(step) => {
                *lock(&self.last_step) = step.clone();
                step
            }
            None => lock(&self.last_step).clone(),
        }
    }
}

impl Default for ScriptedProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl ChatBackend for ScriptedProvider {
    type Error = LlmError;

    fn chat(&self, messages: &[ChatMessage], _options: &ChatOptions) -> Result<String, Self::Error> {
        lock(&self.transcripts).push(messages.to_vec());

        match self.next_step() {
            ScriptStep::Reply(text) => Ok(text),
            ScriptStep::Fail(err) => Err(err),
        }
    }

    fn model_name(&self) -> &str {
        if self.simulated {
            "mock-llm"
        } else {
            "scripted"
        }
    }

    fn is_simulated(&self) -> bool {
        self.simulated
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

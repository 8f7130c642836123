//! Main Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::parse_metadata;
use crate::prompt::{build_prompt, TemplateResolver};
use crate::types::{Extraction, ExtractionOptions};
use quackmeta_domain::traits::{mentions_credential, ChatBackend};
use quackmeta_domain::ChatMessage;
use tracing::{debug, error, info, warn};

/// Corrective message appended after every unusable reply
pub const FEEDBACK_MESSAGE: &str = "The response couldn't be properly parsed as JSON or didn't match the required schema. \
Please provide a valid JSON response with all required fields using the exact structure specified in the initial prompt. \
Return only the JSON object with no markdown or additional text.";

/// Extracts document metadata through an LLM, retrying with feedback
pub struct Extractor<B: ChatBackend> {
    backend: B,
    config: ExtractorConfig,
    resolver: TemplateResolver,
}

impl<B: ChatBackend> Extractor<B> {
    /// Create a new extractor resolving templates for the running installation
    pub fn new(backend: B, config: ExtractorConfig) -> Self {
        Self::with_resolver(backend, config, TemplateResolver::from_environment())
    }

    /// Create a new extractor with a specific template resolver
    pub fn with_resolver(backend: B, config: ExtractorConfig, resolver: TemplateResolver) -> Self {
        Self {
            backend,
            config,
            resolver,
        }
    }

    /// Extract metadata from document content
    ///
    /// The prompt is rendered once. Each attempt sends the whole transcript.
    /// An unusable reply is appended to the transcript together with
    /// [`FEEDBACK_MESSAGE`]; a failed call leaves the transcript untouched.
    /// Credential failures end the loop at once.
    pub fn extract(
        &self,
        content: &str,
        options: &ExtractionOptions,
    ) -> Result<Extraction, ExtractorError> {
        let retries = options.retries;
        if retries == 0 {
            return Err(ExtractorError::Config("retries must be at least 1".to_string()));
        }

        let template_path = match &options.prompt_template {
            Some(path) => path.clone(),
            None => self
                .resolver
                .get_template_path(&self.config.template_name, &self.config.template_category),
        };

        let prompt = build_prompt(&template_path, content)?;
        if options.verbose {
            info!("Generated prompt:\n{}", prompt);
        } else {
            debug!("Prompt length: {} chars", prompt.len());
        }

        let chat_options = self.config.chat_options();
        let mut transcript = vec![ChatMessage::user(prompt)];

        for attempt in 1..=retries {
            let attempts_remain = attempt < retries;
            info!(
                "Sending prompt to {} (attempt {}/{})",
                self.backend.model_name(),
                attempt,
                retries
            );

            let response = match self.backend.chat(&transcript, &chat_options) {
                Ok(response) => response,
                Err(e) => {
                    let reason = e.to_string();
                    if mentions_credential(&reason) {
                        error!("LLM credential error: {}", reason);
                        return Err(ExtractorError::Credential(reason));
                    }
                    if attempts_remain {
                        warn!("LLM call failed on attempt {}: {}", attempt, reason);
                        self.pause();
                        continue;
                    }
                    error!("LLM call failed on final attempt {}: {}", attempt, reason);
                    return Err(ExtractorError::LlmUnavailable {
                        attempts: attempt,
                        reason,
                    });
                }
            };

            if options.verbose {
                info!("LLM response (attempt {}):\n{}", attempt, response);
            }

            match parse_metadata(&response) {
                Ok(mut metadata) => {
                    let overridden_rarity = metadata.apply_derived_rarity();
                    if let Some(proposed) = &overridden_rarity {
                        info!(
                            "Rarity overridden: model proposed {}, derived {}",
                            proposed, metadata.rarity
                        );
                    }
                    info!("Extracted metadata on attempt {}", attempt);
                    return Ok(Extraction {
                        metadata,
                        attempts: attempt,
                        overridden_rarity,
                        model_name: self.backend.model_name().to_string(),
                        using_mock: self.backend.is_simulated(),
                    });
                }
                Err(e) => {
                    warn!("Attempt {}/{} returned unusable metadata: {}", attempt, retries, e);
                    transcript.push(ChatMessage::assistant(response));
                    transcript.push(ChatMessage::user(FEEDBACK_MESSAGE));
                    if attempts_remain {
                        self.pause();
                    }
                }
            }
        }

        Err(ExtractorError::ExtractionFailed { attempts: retries })
    }

    fn pause(&self) {
        let delay = self.config.retry_delay();
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

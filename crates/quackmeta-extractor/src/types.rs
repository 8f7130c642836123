//! Metadata schema and extraction request/response types

use quackmeta_domain::{calculate_rarity, Rarity};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Generated profile of a document's likely author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorProfile {
    /// Author's name
    pub name: String,

    /// Author's profession or occupation
    pub profession: String,

    /// Characteristic writing style
    pub writing_style: String,

    /// Estimated age range of the author
    pub possible_age_range: String,

    /// Possible geographic location of the author
    pub location_guess: String,
}

/// Structured metadata extracted from a document
///
/// Serialized field-for-field as the persisted `*.metadata.json` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Title of the document
    pub title: String,

    /// Brief summary; sole input to rarity derivation
    pub summary: String,

    /// Style of writing (e.g., concise, academic, poetic)
    pub author_style: String,

    /// Emotional tone (e.g., serious, humorous, critical)
    pub tone: String,

    /// Primary language of the document
    pub language: String,

    /// Subject domain (e.g., politics, philosophy, food)
    pub domain: String,

    /// Estimated date of creation if detectable
    #[serde(default)]
    pub estimated_date: Option<String>,

    /// Rarity label; always recomputed from `summary` after validation
    pub rarity: String,

    /// Generated profile of the likely author
    pub author_profile: AuthorProfile,
}

impl Metadata {
    /// Rarity derived from this record's own summary
    pub fn derived_rarity(&self) -> Rarity {
        calculate_rarity(&self.summary)
    }

    /// Overwrite `rarity` with the derived value
    ///
    /// Returns the previous label when it differed.
    pub fn apply_derived_rarity(&mut self) -> Option<String> {
        let derived = self.derived_rarity().as_str();
        if self.rarity == derived {
            return None;
        }
        Some(std::mem::replace(&mut self.rarity, derived.to_string()))
    }
}

/// Per-invocation options for the retry engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionOptions {
    /// Total attempts (at least 1)
    pub retries: u32,

    /// Custom template file replacing the resolved default
    pub prompt_template: Option<PathBuf>,

    /// Log the rendered prompt and every raw reply
    pub verbose: bool,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            retries: 3,
            prompt_template: None,
            verbose: false,
        }
    }
}

/// Successful outcome of the retry engine
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Validated record, rarity already recomputed
    pub metadata: Metadata,

    /// Attempt (1-indexed) that produced the record
    pub attempts: u32,

    /// Rarity label the model proposed, if it was overridden
    pub overridden_rarity: Option<String>,

    /// Model that produced the record
    pub model_name: String,

    /// Whether the record came from a simulated backend
    pub using_mock: bool,
}

//! QuackMetadata Extractor
//!
//! Turns raw document text into a validated [`Metadata`] record using a chat LLM.
//!
//! # Overview
//!
//! Models frequently reply with prose, markdown-wrapped JSON or records with
//! missing fields. The extractor treats that as the normal case: every
//! unusable reply is shown back to the model together with a corrective
//! message, and the conversation continues until a reply validates or the
//! attempt budget runs out.
//!
//! # Architecture
//!
//! ```text
//! Template → Prompt → LLM ⇄ Parser/Validator → Rarity override → Metadata
//! ```
//!
//! # Example Usage
//!
//! ```
//! use quackmeta_extractor::{ExtractionOptions, Extractor, ExtractorConfig};
//! use quackmeta_llm::ScriptedProvider;
//!
//! let llm = ScriptedProvider::simulated();
//! let config = ExtractorConfig { retry_delay_ms: 0, ..ExtractorConfig::default() };
//! let extractor = Extractor::new(llm, config);
//!
//! let extraction = extractor
//!     .extract("A short note about ducks.", &ExtractionOptions::default())
//!     .unwrap();
//!
//! assert_eq!(extraction.metadata.title, "Mock Document");
//! assert!(extraction.using_mock);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod parser;
mod prompt;
mod types;


pub use config::{ExtractorConfig, MAX_RETRIES};
pub use error::ExtractorError;
pub use extractor::{Extractor, FEEDBACK_MESSAGE};
pub use parser::{extract_json, parse_metadata};
pub use prompt::{
    build_prompt, render_prompt, render_template, PromptContext,
    TemplateResolver, DEFAULT_TEMPLATE,
};
pub use types::{AuthorProfile, Extraction, ExtractionOptions, Metadata};

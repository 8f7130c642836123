//! QuackMetadata Processor
//!
//! Orchestrates one document end to end: classify the input designator,
//! fetch remote files, run the extractor, write the metadata file
//! atomically, render the summary card and push results back to Drive.
//!
//! # Architecture
//!
//! ```text
//! designator ─┬─ local file ─────────────────────┐
//!             └─ Drive id → download (scratch) ──┴→ Extractor → JSON file → card
//!                                                                   └→ upload (remote only)
//! ```
//!
//! Only one processor may run per working directory; see [`ProcessLock`].

#![warn(missing_docs)]

mod card;
mod config;
mod error;
mod lock;
mod processor;

pub use card::create_metadata_card;
pub use config::ProcessorConfig;
pub use error::ProcessorError;
pub use lock::ProcessLock;
pub use processor::{write_json_atomic, MetadataProcessor, ProcessOptions, ProcessResult};

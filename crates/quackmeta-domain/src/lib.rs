//! QuackMetadata Domain Layer
//!
//! This crate contains the pure building blocks shared by every other layer.
//! It has ZERO external dependencies and defines the value types and trait
//! interfaces that the infrastructure crates implement.
//!
//! ## Key Concepts
//!
//! - **Rarity**: three-tier classification derived from a document summary
//! - **Transcript**: role-tagged messages exchanged with a chat model
//! - **Designator**: the input string naming a document (local path or remote id)
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure logic only
//! - Network and filesystem implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod designator;
pub mod message;
pub mod rarity;
pub mod traits;

// Re-exports for convenience
pub use designator::is_likely_drive_id;
pub use message::{ChatMessage, ChatOptions, Role};
pub use rarity::{calculate_rarity, Rarity};

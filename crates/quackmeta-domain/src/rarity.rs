//! Rarity module - deterministic classification of a document summary

/// Summaries longer than this (in characters) may qualify as legendary
pub const LEGENDARY_MIN_CHARS: usize = 500;

/// Summaries longer than this (in characters) are at least rare
pub const RARE_MIN_CHARS: usize = 300;

/// Terms that promote a long summary to legendary
pub const LEGENDARY_TERMS: [&str; 7] = [
    "groundbreaking",
    "revolutionary",
    "unprecedented",
    "extraordinary",
    "remarkable",
    "absurd",
    "paradoxical",
];

/// Terms that make any summary rare
pub const RARE_TERMS: [&str; 7] = [
    "innovative",
    "unique",
    "uncommon",
    "unusual",
    "specialized",
    "technical",
    "complex",
];

/// Rarity tier of a document
///
/// Tiers are ordered: `Common < Rare < Legendary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rarity {
    /// Ordinary document
    Common,

    /// Long or specialised document
    Rare,

    /// Long document described in superlatives
    Legendary,
}

impl Rarity {
    /// Get the display label, including the leading glyph
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "🟢 Common",
            Rarity::Rare => "🔴 Rare",
            Rarity::Legendary => "🟣 Legendary",
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a summary into a rarity tier
///
/// First match wins:
/// 1. empty summary is `Common`
/// 2. more than 500 characters and a legendary term is `Legendary`
/// 3. more than 300 characters or a rare term is `Rare`
/// 4. anything else is `Common`
///
/// Term matching is a case-insensitive substring match.
///
/// # Examples
///
/// ```
/// use quackmeta_domain::{calculate_rarity, Rarity};
///
/// assert_eq!(calculate_rarity(""), Rarity::Common);
/// assert_eq!(calculate_rarity("A unique take on bread"), Rarity::Rare);
/// ```
pub fn calculate_rarity(summary: &str) -> Rarity {
    if summary.is_empty() {
        return Rarity::Common;
    }

    let length = summary.chars().count();
    let lower = summary.to_lowercase();
    let mentions = |terms: &[&str]| terms.iter().any(|term| lower.contains(term));

    if length > LEGENDARY_MIN_CHARS && mentions(&LEGENDARY_TERMS) {
        return Rarity::Legendary;
    }

    if length > RARE_MIN_CHARS || mentions(&RARE_TERMS) {
        return Rarity::Rare;
    }

    Rarity::Common
}

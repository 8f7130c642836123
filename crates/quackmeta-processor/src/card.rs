//! Fixed-width metadata card

use quackmeta_extractor::Metadata;

const TOP: &str = "╔══════════════════════════════════════════╗";
const HEADER: &str = "║            🃏 METADATA CARD              ║";
const DIVIDER: &str = "╠══════════════════════════════════════════╣";
const BOTTOM: &str = "╚══════════════════════════════════════════╝";
const MOCK_WARNING: &str = "║ ⚠️ USING MOCK LLM - DATA IS SIMULATED ⚠️  ║";

/// Characters between the two vertical borders
const INNER_WIDTH: usize = 42;

/// Render the boxed summary card for a record
pub fn create_metadata_card(metadata: &Metadata, using_mock: bool) -> String {
    let mut lines = vec![
        TOP.to_string(),
        HEADER.to_string(),
        DIVIDER.to_string(),
        row("Title", &metadata.title),
        row("Domain", &metadata.domain),
        row("Tone", &metadata.tone),
        row("Rarity", &metadata.rarity),
    ];

    if using_mock {
        lines.push(DIVIDER.to_string());
        lines.push(MOCK_WARNING.to_string());
    }

    lines.push(BOTTOM.to_string());
    lines.join("\n")
}

/// Labelled row, value clipped and padded to fill the box
fn row(label: &str, value: &str) -> String {
    let width = INNER_WIDTH - label.len() - 3;
    let clipped: String = value.chars().take(width).collect();
    format!("║ {}: {:<width$}║", label, clipped, width = width)
}

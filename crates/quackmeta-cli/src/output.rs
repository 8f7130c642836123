//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use quackmeta_extractor::Metadata;
use quackmeta_processor::ProcessResult;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the full metadata record.
    pub fn format_metadata(&self, metadata: &Metadata) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(metadata)?),
            OutputFormat::Table => Ok(self.format_metadata_table(metadata)),
        }
    }

    /// Format the metadata record as a two-column table.
    fn format_metadata_table(&self, metadata: &Metadata) -> String {
        let profile = &metadata.author_profile;
        let rows = [
            ("Title", metadata.title.as_str()),
            ("Summary", metadata.summary.as_str()),
            ("Author style", metadata.author_style.as_str()),
            ("Tone", metadata.tone.as_str()),
            ("Language", metadata.language.as_str()),
            ("Domain", metadata.domain.as_str()),
            ("Estimated date", metadata.estimated_date.as_deref().unwrap_or("unknown")),
            ("Rarity", metadata.rarity.as_str()),
            ("Author", profile.name.as_str()),
            ("Profession", profile.profession.as_str()),
            ("Writing style", profile.writing_style.as_str()),
            ("Age range", profile.possible_age_range.as_str()),
            ("Location", profile.location_guess.as_str()),
        ];
        key_value_table(&rows)
    }

    /// Format a status report.
    pub fn format_status(&self, rows: &[(&str, String)]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let map: serde_json::Map<String, serde_json::Value> = rows
                    .iter()
                    .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.clone())))
                    .collect();
                Ok(serde_json::to_string_pretty(&map)?)
            }
            OutputFormat::Table => {
                let rows: Vec<(&str, &str)> = rows.iter().map(|(k, v)| (*k, v.as_str())).collect();
                Ok(key_value_table(&rows))
            }
        }
    }

    /// Format the outcome of an extract run.
    ///
    /// Remote inputs get an upload line: the new id, a dry-run note, or a
    /// warning when the upload did not happen.
    pub fn extraction_report(&self, result: &ProcessResult, dry_run: bool) -> String {
        let mut lines = vec![
            self.success(&format!("🎉 {}", result.message)),
            self.info(&format!("Metadata saved to: {}", result.metadata_path.display())),
            String::new(),
            result.card.clone(),
            String::new(),
        ];

        if result.using_mock {
            lines.push(self.warning("Simulated LLM in use; metadata is not real analysis"));
        }

        if let Some(name) = &result.original_file_name {
            match (&result.remote_id, dry_run) {
                (Some(id), _) => lines.push(
                    self.success(&format!("✅ Metadata uploaded to Google Drive with ID: {}", id)),
                ),
                (None, true) => lines.push(self.info(&format!(
                    "Dry run: metadata for {} was not uploaded",
                    name
                ))),
                (None, false) => {
                    lines.push(self.warning("📤 Metadata file ready for upload to Google Drive"))
                }
            }
        }

        lines.join("\n")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn key_value_table(rows: &[(&str, &str)]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, value) in rows {
        builder.push_record([*key, *value]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

//! Status command implementation.

use crate::config::{Config, LlmBackendKind};
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Execute the status command.
pub fn execute_status(config: &Config, config_path: Option<&Path>, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_status(&status_rows(config, config_path))?);

    if config.llm.provider == LlmBackendKind::OpenAi && config.llm.api_key.is_none() {
        println!(
            "{}",
            formatter.warning("No LLM API key configured; set OPENAI_API_KEY or use --mock")
        );
    }

    Ok(())
}

/// Rows describing the effective configuration.
pub fn status_rows(config: &Config, config_path: Option<&Path>) -> Vec<(&'static str, String)> {
    let yes_no = |b: bool| (if b { "yes" } else { "no" }).to_string();
    let lock_path = config.processor.lock_path();

    vec![
        (
            "Config file",
            config_path
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "defaults".to_string()),
        ),
        ("LLM backend", config.llm.provider.as_str().to_string()),
        ("Model", config.llm.model.clone()),
        ("Endpoint", config.llm.endpoint.clone()),
        ("API key configured", yes_no(config.llm.api_key.is_some())),
        (
            "Drive token configured",
            yes_no(config.drive.access_token.is_some()),
        ),
        ("Retries", config.extractor.retries.to_string()),
        ("Output dir", config.processor.output_dir.display().to_string()),
        ("Temp dir", config.processor.temp_dir.display().to_string()),
        ("Lock present", yes_no(lock_path.exists())),
    ]
}

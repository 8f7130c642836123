//! Extract command tests against the simulated LLM

use quackmeta_cli::commands::execute_extract;
use quackmeta_cli::commands::extract::run_extract;
use quackmeta_cli::config::LlmBackendKind;
use quackmeta_cli::{CliError, Config, ExtractArgs, Formatter, OutputFormat};
use quackmeta_llm::ScriptedProvider;
use quackmeta_processor::{ProcessLock, ProcessorError};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

fn config_in(root: &Path) -> Config {
    let mut config = Config::default();
    config.llm.provider = LlmBackendKind::Mock;
    config.extractor.retry_delay_ms = 0;
    config.processor.output_dir = root.join("output");
    config.processor.temp_dir = root.join("temp");
    config
}

fn args(input: &str) -> ExtractArgs {
    ExtractArgs {
        input: input.to_string(),
        output: None,
        prompt_template: None,
        retries: None,
        dry_run: false,
        verbose: false,
        mock: false,
        show_metadata: false,
    }
}

#[test]
fn test_mock_extraction_writes_metadata() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("pond.txt");
    fs::write(&input, "Ducks paddle across the pond.").unwrap();

    let result = run_extract(
        ScriptedProvider::simulated(),
        &args(input.to_str().unwrap()),
        &config_in(dir.path()),
    )
    .unwrap();

    assert!(result.using_mock);
    assert_eq!(result.metadata.title, "Mock Document");
    assert_eq!(result.metadata_path, dir.path().join("output/pond.metadata.json"));
    assert!(result.metadata_path.is_file());
    assert!(!dir.path().join("temp/.quackmeta.lock").exists());
}

#[test]
fn test_execute_extract_with_mock_provider_config() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("pond.txt");
    fs::write(&input, "Ducks.").unwrap();

    let mut extract_args = args(input.to_str().unwrap());
    extract_args.show_metadata = true;
    let formatter = Formatter::new(OutputFormat::Json, false);

    execute_extract(extract_args, &config_in(dir.path()), &formatter).unwrap();
    assert!(dir.path().join("output/pond.metadata.json").is_file());
}

#[test]
fn test_missing_input_reports_extract_error() {
    let dir = TempDir::new().unwrap();
    let err = run_extract(
        ScriptedProvider::simulated(),
        &args("no-such-input.txt"),
        &config_in(dir.path()),
    )
    .unwrap_err();

    assert!(matches!(err, CliError::Extract(ProcessorError::NotFound(_))));
    assert_eq!(
        err.to_string(),
        "Failed to extract metadata: File not found: no-such-input.txt"
    );
}

#[test]
fn test_held_lock_reports_init_error() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    fs::create_dir_all(&config.processor.temp_dir).unwrap();
    let _held = ProcessLock::acquire(&config.processor.lock_path(), Duration::from_secs(600)).unwrap();

    let err = run_extract(ScriptedProvider::simulated(), &args("x.txt"), &config).unwrap_err();
    assert!(matches!(err, CliError::Init(ProcessorError::LockConflict { .. })));
}

#[test]
fn test_missing_prompt_template_rejected_early() {
    let dir = TempDir::new().unwrap();
    let mut extract_args = args("x.txt");
    extract_args.prompt_template = Some(dir.path().join("missing.mustache"));
    let formatter = Formatter::new(OutputFormat::Table, false);

    let err = execute_extract(extract_args, &config_in(dir.path()), &formatter).unwrap_err();
    assert!(matches!(err, CliError::InvalidInput(_)));
    assert!(!dir.path().join("output").exists());
}

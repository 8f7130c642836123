//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::config::{Config, LlmBackendKind};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use quackmeta_domain::traits::ChatBackend;
use quackmeta_drive::GoogleDriveStorage;
use quackmeta_extractor::{ExtractionOptions, Extractor};
use quackmeta_llm::{OpenAiProvider, ScriptedProvider};
use quackmeta_processor::{MetadataProcessor, ProcessOptions, ProcessResult};
use tracing::info;

/// Execute the extract command.
pub fn execute_extract(args: ExtractArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    if let Some(template) = &args.prompt_template {
        if !template.is_file() {
            return Err(CliError::InvalidInput(format!(
                "Prompt template not found: {}",
                template.display()
            )));
        }
    }

    info!("Extracting metadata from: {}", args.input);
    println!("{}", formatter.info("🕵️ Extracting metadata..."));

    let result = if args.mock || config.llm.provider == LlmBackendKind::Mock {
        run_extract(ScriptedProvider::simulated(), &args, config)?
    } else {
        let provider = OpenAiProvider::new(
            config.llm.endpoint.clone(),
            config.llm.model.clone(),
            config.llm.api_key.clone(),
        )?;
        run_extract(provider, &args, config)?
    };

    println!("{}", formatter.extraction_report(&result, args.dry_run));

    if args.show_metadata {
        println!("{}", formatter.format_metadata(&result.metadata)?);
    }

    Ok(())
}

/// Process one input with the given backend.
pub fn run_extract<B: ChatBackend>(
    backend: B,
    args: &ExtractArgs,
    config: &Config,
) -> Result<ProcessResult> {
    let extractor = Extractor::new(backend, config.extractor.clone());
    let storage = GoogleDriveStorage::new(config.drive.clone())?;
    let processor = MetadataProcessor::initialize(extractor, storage, config.processor.clone())
        .map_err(CliError::Init)?;

    let options = ProcessOptions {
        extraction: ExtractionOptions {
            retries: args.retries.unwrap_or(config.extractor.retries),
            prompt_template: args.prompt_template.clone(),
            verbose: args.verbose,
        },
        dry_run: args.dry_run,
    };

    processor
        .process(&args.input, args.output.as_deref(), &options)
        .map_err(CliError::Extract)
}

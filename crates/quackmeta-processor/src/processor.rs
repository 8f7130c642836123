//! Document processing pipeline

use crate::card::create_metadata_card;
use crate::config::ProcessorConfig;
use crate::error::ProcessorError;
use crate::lock::ProcessLock;
use quackmeta_domain::is_likely_drive_id;
use quackmeta_domain::traits::{ChatBackend, RemoteStorage};
use quackmeta_extractor::{ExtractionOptions, Extractor, Metadata};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Options for a single `process` call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOptions {
    /// Options passed to the extractor
    pub extraction: ExtractionOptions,

    /// Skip uploading results for remote inputs
    pub dry_run: bool,
}

/// Successful outcome of processing one document
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessResult {
    /// Extracted record, as written to disk
    pub metadata: Metadata,

    /// Where the record was written
    pub metadata_path: PathBuf,

    /// Boxed summary card
    pub card: String,

    /// Human-readable outcome
    pub message: String,

    /// Whether a simulated LLM produced the record
    pub using_mock: bool,

    /// Attempts the extractor spent
    pub attempts: u32,

    /// Model that produced the record
    pub model_name: String,

    /// Id of the uploaded metadata file (remote inputs only)
    pub remote_id: Option<String>,

    /// Display name of the remote source file (remote inputs only)
    pub original_file_name: Option<String>,
}

/// Bridges input designators to the extractor and persists results
///
/// Holds the working-directory lock for its whole lifetime.
pub struct MetadataProcessor<B: ChatBackend, S: RemoteStorage> {
    extractor: Extractor<B>,
    storage: S,
    config: ProcessorConfig,
    _lock: ProcessLock,
}

impl<B: ChatBackend, S: RemoteStorage> MetadataProcessor<B, S> {
    /// Create working directories and take the lock
    pub fn initialize(
        extractor: Extractor<B>,
        storage: S,
        config: ProcessorConfig,
    ) -> Result<Self, ProcessorError> {
        config.validate()?;

        for dir in [&config.output_dir, &config.temp_dir] {
            fs::create_dir_all(dir).map_err(|e| {
                ProcessorError::Init(format!("Failed to create directory {}: {}", dir.display(), e))
            })?;
        }

        let lock = ProcessLock::acquire(&config.lock_path(), config.lock_stale_after())?;
        info!(
            "Processor initialized (output: {}, scratch: {})",
            config.output_dir.display(),
            config.temp_dir.display()
        );

        Ok(Self {
            extractor,
            storage,
            config,
            _lock: lock,
        })
    }

    /// Process a local path or a Drive file id
    ///
    /// An existing local path always wins over the Drive-id heuristic.
    pub fn process(
        &self,
        designator: &str,
        output: Option<&Path>,
        options: &ProcessOptions,
    ) -> Result<ProcessResult, ProcessorError> {
        let local = Path::new(designator);
        if local.exists() {
            return self.process_local(local, output, options);
        }

        if is_likely_drive_id(designator) {
            return self.process_remote(designator, output, options);
        }

        Err(ProcessorError::NotFound(designator.to_string()))
    }

    /// Default metadata location for an input file
    pub fn default_output_path(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "output".to_string());
        self.config.output_dir.join(format!("{}.metadata.json", stem))
    }

    fn process_local(
        &self,
        path: &Path,
        output: Option<&Path>,
        options: &ProcessOptions,
    ) -> Result<ProcessResult, ProcessorError> {
        if !path.is_file() {
            return Err(ProcessorError::NotAFile(path.to_path_buf()));
        }

        info!("Reading file: {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| ProcessorError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let extraction = self.extractor.extract(&content, &options.extraction)?;

        let metadata_path = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.default_output_path(path));
        info!("Writing metadata to: {}", metadata_path.display());
        write_json_atomic(&metadata_path, &extraction.metadata)?;

        let card = create_metadata_card(&extraction.metadata, extraction.using_mock);

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let mut message = format!("Successfully extracted metadata from {}", file_name);
        if extraction.using_mock {
            message.push_str(" (using mock data - not actual language model analysis)");
        }

        Ok(ProcessResult {
            metadata: extraction.metadata,
            metadata_path,
            card,
            message,
            using_mock: extraction.using_mock,
            attempts: extraction.attempts,
            model_name: extraction.model_name,
            remote_id: None,
            original_file_name: None,
        })
    }

    fn process_remote(
        &self,
        file_id: &str,
        output: Option<&Path>,
        options: &ProcessOptions,
    ) -> Result<ProcessResult, ProcessorError> {
        info!("Downloading file from Google Drive with ID: {}", file_id);

        let scratch = tempfile::Builder::new()
            .prefix("download-")
            .tempdir_in(&self.config.temp_dir)
            .map_err(|e| ProcessorError::Init(format!("Failed to create scratch directory: {}", e)))?;

        let downloaded = self.storage.download(file_id, scratch.path()).map_err(|e| {
            ProcessorError::Storage(format!("Failed to download file from Google Drive: {}", e))
        })?;
        info!("Downloaded file to: {}", downloaded.path.display());
        let file_info = downloaded.info;

        let mut result = self.process_local(&downloaded.path, output, options)?;

        if !options.dry_run {
            match self
                .storage
                .upload(&result.metadata_path, file_info.parent.as_deref())
            {
                Ok(remote_id) => {
                    info!("Uploaded metadata file to Google Drive with ID: {}", remote_id);
                    result.remote_id = Some(remote_id);
                }
                Err(e) => error!("Failed to upload metadata file to Google Drive: {}", e),
            }
        }

        result.original_file_name = Some(file_info.name);

        if let Err(e) = scratch.close() {
            warn!("Failed to clean up scratch directory: {}", e);
        }

        Ok(result)
    }
}

/// Write `metadata` as 2-space indented JSON, replacing `path` atomically
///
/// A replaced file keeps its permissions; a new file gets `0o644` on Unix.
pub fn write_json_atomic(path: &Path, metadata: &Metadata) -> Result<(), ProcessorError> {
    let write_error = |reason: String| ProcessorError::Write {
        path: path.to_path_buf(),
        reason,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;

    let json = serde_json::to_string_pretty(metadata).map_err(|e| write_error(e.to_string()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(|e| write_error(e.to_string()))?;
    tmp.write_all(json.as_bytes())
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| write_error(e.to_string()))?;
    if let Some(permissions) = output_permissions(path) {
        tmp.as_file()
            .set_permissions(permissions)
            .map_err(|e| write_error(e.to_string()))?;
    }
    tmp.persist(path).map_err(|e| write_error(e.error.to_string()))?;

    Ok(())
}

/// Permissions for the output file: the existing file's, else the platform default
fn output_permissions(path: &Path) -> Option<fs::Permissions> {
    match fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(_) => new_file_permissions(),
    }
}

#[cfg(unix)]
fn new_file_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<fs::Permissions> {
    None
}

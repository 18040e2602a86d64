//! Output artifact store and run reporting
//!
//! One translation materializes as one plain-text file `<code>.txt` under
//! the configured data directory. Writes go to a `.part` staging file that
//! is renamed into place only on commit, so a failed translation never
//! leaves a partial artifact behind and an existing artifact is never
//! overwritten.

mod report;

pub use report::{print_report, HarvestReport, TranslationOutcome};

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Output-specific errors
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Artifact for translation '{id}' already exists")]
    AlreadyExists { id: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Filesystem store for materialized translation artifacts
pub struct OutputStore {
    data_dir: PathBuf,
}

impl OutputStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Final artifact path for a translation code
    pub fn artifact_path(&self, id: &str) -> PathBuf {
        self.data_dir.join(format!("{}.txt", id))
    }

    fn staging_path(&self, id: &str) -> PathBuf {
        self.data_dir.join(format!("{}.txt.part", id))
    }

    /// Returns true if the translation has already been materialized
    ///
    /// This is the whole idempotence mechanism: a re-run sees the artifact
    /// and skips the translation without any network activity.
    pub fn exists(&self, id: &str) -> bool {
        self.artifact_path(id).is_file()
    }

    /// Opens a staging sink for a translation, refusing to clobber an
    /// existing artifact
    pub fn create(&self, id: &str) -> Result<TranslationSink, OutputError> {
        if self.exists(id) {
            return Err(OutputError::AlreadyExists { id: id.to_string() });
        }

        fs::create_dir_all(&self.data_dir)?;
        let staging = self.staging_path(id);
        let file = File::create(&staging)?;

        Ok(TranslationSink {
            id: id.to_string(),
            staging,
            artifact: self.artifact_path(id),
            writer: Some(BufWriter::new(file)),
        })
    }
}

/// Append-only sink for one translation's text fragments
///
/// Owned exclusively by the orchestrator while a translation is being
/// assembled. Dropping the sink without committing removes the staging
/// file.
pub struct TranslationSink {
    id: String,
    staging: PathBuf,
    artifact: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl TranslationSink {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Appends a text fragment exactly as received, no separators added
    pub fn append(&mut self, text: &str) -> Result<(), OutputError> {
        if let Some(writer) = self.writer.as_mut() {
            writer.write_all(text.as_bytes())?;
        }
        Ok(())
    }

    /// Flushes and promotes the staging file to the final artifact
    pub fn commit(mut self) -> Result<PathBuf, OutputError> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        fs::rename(&self.staging, &self.artifact)?;
        tracing::info!("Materialized {}", self.artifact.display());
        Ok(self.artifact.clone())
    }

    /// Abandons the translation, removing the staging file
    pub fn discard(mut self) {
        self.cleanup();
    }

    fn cleanup(&mut self) {
        if self.writer.take().is_some() {
            if let Err(e) = fs::remove_file(&self.staging) {
                tracing::warn!("Failed to remove staging file for '{}': {}", self.id, e);
            }
        }
    }
}

impl Drop for TranslationSink {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// Lists the translation codes already materialized under `data_dir`
pub fn list_artifacts(data_dir: &Path) -> std::io::Result<Vec<String>> {
    let mut ids = Vec::new();
    if !data_dir.is_dir() {
        return Ok(ids);
    }
    for entry in fs::read_dir(data_dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) == Some("txt") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(stem.to_string());
            }
        }
    }
    ids.sort();
    Ok(ids)
}

//! JSON document persistence for the verified-entries store.
//!
//! Writes go to a temp file in the target directory and are renamed into
//! place, so a crash mid-write never leaves a truncated document behind.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::info;

use crate::models::VerifiedEntry;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed ground-truth document {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A JSON array of `VerifiedEntry` records on disk.
#[derive(Debug, Clone)]
pub struct JsonEntryFile {
    path: PathBuf,
}

impl JsonEntryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every record in file order. A missing or empty file is an
    /// empty store, not an error.
    pub fn load(&self) -> Result<Vec<VerifiedEntry>, PersistError> {
        let metadata = match fs::metadata(&self.path) {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No ground-truth file at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };
        if metadata.len() == 0 {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path).map_err(|e| self.io_error(e))?;
        let entries: Vec<VerifiedEntry> =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| self.json_error(e))?;

        info!(
            "Loaded {} verified entries from {}",
            entries.len(),
            self.path.display()
        );
        Ok(entries)
    }

    /// Rewrites the document as `existing` followed by `entry`.
    ///
    /// Either the whole new document lands or the old one is left intact.
    pub fn append(
        &self,
        existing: &[VerifiedEntry],
        entry: &VerifiedEntry,
    ) -> Result<(), PersistError> {
        let records: Vec<&VerifiedEntry> = existing.iter().chain(std::iter::once(entry)).collect();
        self.write_atomic(&records)
    }

    fn write_atomic(&self, records: &[&VerifiedEntry]) -> Result<(), PersistError> {
        let parent_dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent_dir).map_err(|e| self.io_error(e))?;

        let temp_file = NamedTempFile::new_in(parent_dir).map_err(|e| self.io_error(e))?;
        {
            let mut writer = BufWriter::new(temp_file.as_file());
            serde_json::to_writer_pretty(&mut writer, records).map_err(|e| self.json_error(e))?;
            writer.flush().map_err(|e| self.io_error(e))?;
        }
        temp_file
            .as_file()
            .sync_all()
            .map_err(|e| self.io_error(e))?;
        temp_file
            .persist(&self.path)
            .map_err(|e| self.io_error(e.error))?;

        info!(
            "Wrote {} verified entries to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> PersistError {
        PersistError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn json_error(&self, source: serde_json::Error) -> PersistError {
        PersistError::Json {
            path: self.path.clone(),
            source,
        }
    }
}

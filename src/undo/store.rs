use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::types::*;

/// Error types for undo record persistence
#[derive(Debug, thiserror::Error)]
pub enum UndoStoreError {
    #[error("Failed to write undo record: {0}")]
    WriteError(#[from] std::io::Error),

    #[error("Failed to serialize undo record: {0}")]
    SerializeError(#[from] serde_json::Error),

    #[error("Failed to read undo record: {0}")]
    ReadError(String),

    #[error("Undo record version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: String, found: String },
}

/// Single-slot persisted undo record. Saving replaces whatever was there.
#[derive(Debug, Clone)]
pub struct UndoStore {
    path: PathBuf,
}

impl Default for UndoStore {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_FILE)
    }
}

impl UndoStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read the record, or `None` when there is nothing to undo
    pub fn load(&self) -> Result<Option<UndoRecord>, UndoStoreError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = ?self.path, "No undo record");
                return Ok(None);
            }
            Err(e) => {
                return Err(UndoStoreError::ReadError(format!("Cannot open file: {}", e)));
            }
        };

        let stored: StoredRecord = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| UndoStoreError::ReadError(format!("Invalid JSON: {}", e)))?;

        let record = match stored {
            StoredRecord::Versioned(file) => {
                if file.version != UNDO_VERSION {
                    return Err(UndoStoreError::VersionMismatch {
                        expected: UNDO_VERSION.to_string(),
                        found: file.version,
                    });
                }
                UndoRecord {
                    executed_at: Some(file.executed_at),
                    base_directory: Some(file.base_directory),
                    entries: file.changes,
                }
            }
            StoredRecord::Legacy(entries) => UndoRecord {
                executed_at: None,
                base_directory: None,
                entries,
            },
        };

        debug!(path = ?self.path, entries = record.len(), "Undo record loaded");

        Ok(Some(record))
    }

    /// Persist `record` as one unit, replacing any previous record
    pub fn save(&self, record: &UndoRecord) -> Result<(), UndoStoreError> {
        let file = UndoFile {
            version: UNDO_VERSION.to_string(),
            executed_at: record.executed_at.unwrap_or_else(chrono::Utc::now),
            base_directory: record.base_directory.clone().unwrap_or_default(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            changes: record.entries.clone(),
        };

        let temp_path = self.temp_path();

        let written = write_json(&temp_path, &file).and_then(|()| {
            fs::rename(&temp_path, &self.path)?;
            Ok(())
        });
        if let Err(e) = written {
            warn!(path = ?temp_path, error = %e, "Undo record not written");
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        info!(path = ?self.path, entries = record.len(), "Undo record written");

        Ok(())
    }

    /// Remove the record; a missing record is not an error
    pub fn clear(&self) -> Result<(), UndoStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = ?self.path, "Undo record removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(UndoStoreError::WriteError(e)),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

fn write_json(path: &Path, file: &UndoFile) -> Result<(), UndoStoreError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, file)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(())
}

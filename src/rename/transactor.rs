use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::scanner::is_plain_file_name;
use crate::undo::{UndoEntry, UndoRecord, UndoStore, UndoStoreError};

use super::types::RenamePlan;

/// Errors that can occur while applying or undoing a plan
#[derive(Error, Debug)]
pub enum RenameError {
    #[error("Duplicate target names: {}", .names.join(", "))]
    DuplicateTarget { names: Vec<String> },

    #[error("Failed to rename '{from}' to '{to}': {source}")]
    RenameFailed {
        from: String,
        to: String,
        /// Renames completed before this one failed
        applied: usize,
        #[source]
        source: io::Error,
    },

    #[error("Renamed {applied} files but could not save the undo record: {source}")]
    UndoPersist {
        applied: usize,
        #[source]
        source: UndoStoreError,
    },

    #[error("Undo record entry '{name}' is not a plain file name")]
    UnsafeUndoEntry { name: String },

    #[error("No undo record found at {}", .path.display())]
    NoUndoRecord { path: PathBuf },

    #[error("Undo record error: {0}")]
    UndoRecord(#[from] UndoStoreError),
}

/// Applies rename plans and reverses the most recent one.
///
/// Renames are applied one at a time with no rollback: when one fails, the
/// earlier ones stay applied and the rest are not attempted.
#[derive(Debug, Clone, Default)]
pub struct Transactor {
    store: UndoStore,
}

impl Transactor {
    pub fn new(store: UndoStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &UndoStore {
        &self.store
    }

    /// Rename every changed entry of `plan` inside `base_dir`, then save the
    /// inverse mapping as the undo record. Returns the number of files renamed.
    pub fn execute(&self, base_dir: &Path, plan: &RenamePlan) -> Result<usize, RenameError> {
        let duplicates = plan.duplicate_targets();
        if !duplicates.is_empty() {
            warn!(duplicates = ?duplicates, "Refusing plan with duplicate targets");
            return Err(RenameError::DuplicateTarget { names: duplicates });
        }

        info!(
            dir = ?base_dir,
            changes = plan.change_count(),
            "Applying rename plan"
        );

        let mut undo_entries = Vec::with_capacity(plan.change_count());

        for entry in plan.changes() {
            let source = base_dir.join(&entry.old_name);
            let destination = base_dir.join(&entry.new_name);

            rename_file(&source, &destination).map_err(|e| RenameError::RenameFailed {
                from: entry.old_name.clone(),
                to: entry.new_name.clone(),
                applied: undo_entries.len(),
                source: e,
            })?;

            info!("Renamed: {} -> {}", entry.old_name, entry.new_name);
            undo_entries.push(UndoEntry::new(&entry.new_name, &entry.old_name));
        }

        let applied = undo_entries.len();
        let record = UndoRecord::new(base_dir.to_path_buf(), undo_entries);

        self.store
            .save(&record)
            .map_err(|source| RenameError::UndoPersist { applied, source })?;

        Ok(applied)
    }

    /// Replay the saved undo record inside `base_dir`. Entries whose file has
    /// gone missing are skipped. A record naming anything but plain file names
    /// is refused before any rename. The record is deleted afterwards, so an undo
    /// can only run once. Returns the number of files renamed back.
    pub fn undo(&self, base_dir: &Path) -> Result<usize, RenameError> {
        let record = self.store.load()?.ok_or_else(|| RenameError::NoUndoRecord {
            path: self.store.path().to_path_buf(),
        })?;

        if let Some(recorded) = &record.base_directory {
            if !same_directory(recorded, base_dir) {
                warn!(
                    recorded = ?recorded,
                    requested = ?base_dir,
                    "Undo record was written for a different directory"
                );
            }
        }

        if let Some(name) = record
            .entries
            .iter()
            .flat_map(|e| [&e.from, &e.to])
            .find(|name| !is_plain_file_name(name))
        {
            warn!(name = %name, "Refusing undo record with a path outside the directory");
            return Err(RenameError::UnsafeUndoEntry {
                name: name.to_string(),
            });
        }

        info!(dir = ?base_dir, entries = record.len(), "Undoing last rename");

        let mut reversed = 0;

        for entry in &record.entries {
            let current = base_dir.join(&entry.from);
            let original = base_dir.join(&entry.to);

            if !current.exists() {
                warn!(name = %entry.from, "File no longer exists, skipping");
                continue;
            }

            rename_file(&current, &original).map_err(|e| RenameError::RenameFailed {
                from: entry.from.clone(),
                to: entry.to.clone(),
                applied: reversed,
                source: e,
            })?;

            info!("Reverted: {} -> {}", entry.from, entry.to);
            reversed += 1;
        }

        self.store.clear()?;

        debug!(reversed, skipped = record.len() - reversed, "Undo complete");

        Ok(reversed)
    }
}

/// Rename without clobbering a different file already at `destination`
fn rename_file(source: &Path, destination: &Path) -> io::Result<()> {
    if fs::symlink_metadata(destination).is_ok() && !is_same_file(source, destination) {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "Destination already exists",
        ));
    }

    fs::rename(source, destination)
}

#[cfg(unix)]
fn is_same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::symlink_metadata(a), fs::symlink_metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn same_directory(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace, warn};

#[derive(Error, Debug)]
pub enum ScannerError {
    #[error("Path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Failed to read directory: {0}")]
    IoError(#[from] std::io::Error),
}

/// A file as found on disk, named relative to the scanned directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
}

impl FileEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl AsRef<str> for FileEntry {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

/// Which files of a directory take part in a rename
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    extension: Option<String>,
    exclude: Option<PathBuf>,
}

impl FileFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only names ending in `ext` (case-insensitive). A missing leading
    /// dot is added; a blank value keeps everything.
    pub fn with_extension(mut self, ext: Option<&str>) -> Self {
        self.extension = ext.map(str::trim).filter(|e| !e.is_empty()).map(|e| {
            let e = e.to_lowercase();
            if e.starts_with('.') {
                e
            } else {
                format!(".{}", e)
            }
        });
        self
    }

    /// Drop one specific file from the listing
    pub fn excluding(mut self, path: Option<PathBuf>) -> Self {
        self.exclude = path;
        self
    }

    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    fn matches_name(&self, name: &str) -> bool {
        match &self.extension {
            Some(ext) => name.to_lowercase().ends_with(ext.as_str()),
            None => true,
        }
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let Some(exclude) = &self.exclude else {
            return false;
        };
        match (fs::canonicalize(exclude), fs::canonicalize(path)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

/// Whether `name` contains a path separator
pub fn has_path_separator(name: &str) -> bool {
    name.contains('/') || name.contains(std::path::MAIN_SEPARATOR)
}

pub fn is_reserved_name(name: &str) -> bool {
    name == "." || name == ".."
}

/// Whether `name` can only refer to an entry directly inside a directory
pub fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && !has_path_separator(name) && !is_reserved_name(name)
}

/// Check that `target` exists and is a directory
pub fn ensure_directory(target: &Path) -> Result<(), ScannerError> {
    if !target.exists() {
        return Err(ScannerError::PathNotFound(target.to_path_buf()));
    }

    if !target.is_dir() {
        return Err(ScannerError::NotADirectory(target.to_path_buf()));
    }

    Ok(())
}

/// List the regular files directly inside `target`, sorted by name
pub fn list_files(target: &Path, filter: &FileFilter) -> Result<Vec<FileEntry>, ScannerError> {
    debug!(path = ?target, extension = ?filter.extension(), "Listing files");

    ensure_directory(target)?;

    let read_dir = fs::read_dir(target).map_err(|e| {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            ScannerError::PermissionDenied(target.to_path_buf())
        } else {
            ScannerError::IoError(e)
        }
    })?;

    let mut entries = Vec::new();

    for entry in read_dir {
        let entry = entry?;
        let path = entry.path();

        trace!(entry = ?path, "Examining entry");

        if !path.is_file() {
            trace!(path = ?path, "Skipping non-file");
            continue;
        }

        let name = match entry.file_name().into_string() {
            Ok(n) => n,
            Err(raw) => {
                warn!(name = ?raw, "Skipping file with non-UTF-8 name");
                continue;
            }
        };

        if !filter.matches_name(&name) {
            trace!(name = %name, "Skipping file outside extension filter");
            continue;
        }

        if filter.is_excluded(&path) {
            debug!(name = %name, "Skipping undo record");
            continue;
        }

        entries.push(FileEntry::new(name));
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));

    debug!(count = entries.len(), "Listing complete");

    Ok(entries)
}

mod codes;

pub use codes::ExitCode;

use crate::preview::PreviewError;
use crate::rename::RenameError;
use crate::scanner::ScannerError;
use crate::undo::UndoStoreError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Target directory not found: {}", .path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("Path is not a directory: {}", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("Permission denied: {}", .path.display())]
    PermissionDenied { path: PathBuf },

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Invalid regex pattern: {pattern}")]
    InvalidPattern { pattern: String, detail: String },

    #[error("Duplicate new file names")]
    DuplicateTargets { names: Vec<String> },

    #[error("Rename failed: {from} -> {to}")]
    RenameError {
        from: String,
        to: String,
        applied: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Renamed {applied} files but the undo record could not be saved")]
    UndoPersistError { applied: usize, message: String },

    #[error("No undo data found")]
    NoUndoRecord { path: PathBuf },

    #[error("Undo record error: {message}")]
    UndoRecordError { message: String },

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AppError::DirectoryNotFound { .. } => ExitCode::DirectoryNotFound,
            AppError::NotADirectory { .. } => ExitCode::DirectoryNotFound,
            AppError::PermissionDenied { .. } => ExitCode::PermissionError,
            AppError::InvalidArguments(_) => ExitCode::InvalidArguments,
            AppError::InvalidPattern { .. } => ExitCode::InvalidPattern,
            AppError::DuplicateTargets { .. } => ExitCode::DuplicateTargets,
            AppError::RenameError { .. } => ExitCode::RenameError,
            AppError::UndoPersistError { .. } => ExitCode::UndoPersistError,
            AppError::NoUndoRecord { .. } => ExitCode::NoUndoRecord,
            AppError::UndoRecordError { .. } => ExitCode::UndoRecordError,
            AppError::Other(_) => ExitCode::GeneralError,
        }
    }

    pub fn detailed_message(&self) -> String {
        match self {
            AppError::DirectoryNotFound { path } => {
                format!(
                    "The specified directory does not exist:\n  {}\n\n\
                     Please verify the path and try again.",
                    path.display()
                )
            }

            AppError::NotADirectory { path } => {
                format!(
                    "The specified path is not a directory:\n  {}\n\n\
                     Please provide a valid directory path.",
                    path.display()
                )
            }

            AppError::PermissionDenied { path } => {
                format!(
                    "Permission denied when accessing:\n  {}\n\n\
                     Please check file permissions or run with appropriate privileges.",
                    path.display()
                )
            }

            AppError::InvalidArguments(message) => message.clone(),

            AppError::InvalidPattern { pattern, detail } => {
                format!(
                    "Regex pattern error in '{}':\n{}\n\n\
                     No files were renamed.",
                    pattern, detail
                )
            }

            AppError::DuplicateTargets { names } => {
                let mut msg = String::from(
                    "Duplicate new filenames detected. Rename aborted.\n\n\
                     These names would be used more than once:\n",
                );
                for name in names.iter().take(10) {
                    msg.push_str(&format!("  - {}\n", name));
                }
                if names.len() > 10 {
                    msg.push_str(&format!("  ... and {} more\n", names.len() - 10));
                }
                msg.push_str("\nAdjust the pattern or replacement so every new name is unique.");
                msg
            }

            AppError::RenameError {
                from,
                to,
                applied,
                source,
            } => {
                format!(
                    "Failed to rename file:\n\
                     From:  {}\n\
                     To:    {}\n\
                     Error: {}\n\n\
                     {} file(s) renamed before the failure were left as they are.\n\
                     Check file permissions and whether the new name is already taken.",
                    from, to, source, applied
                )
            }

            AppError::UndoPersistError { applied, message } => {
                format!(
                    "Renamed {} file(s), but saving the undo record failed:\n  {}\n\n\
                     The renames stand. Undo is not available for this change.",
                    applied, message
                )
            }

            AppError::NoUndoRecord { path } => {
                format!(
                    "No undo data found:\n  {}\n\n\
                     Only the most recent rename can be undone, and only once.",
                    path.display()
                )
            }

            AppError::UndoRecordError { message } => {
                format!(
                    "Failed to use the undo record:\n  {}\n\n\
                     Ensure the undo record exists and is valid JSON.",
                    message
                )
            }

            AppError::Other(message) => message.clone(),
        }
    }
}

impl From<ScannerError> for AppError {
    fn from(err: ScannerError) -> Self {
        match err {
            ScannerError::PathNotFound(path) => AppError::DirectoryNotFound { path },
            ScannerError::NotADirectory(path) => AppError::NotADirectory { path },
            ScannerError::PermissionDenied(path) => AppError::PermissionDenied { path },
            ScannerError::IoError(e) => AppError::Other(format!("I/O error: {}", e)),
        }
    }
}

impl From<PreviewError> for AppError {
    fn from(err: PreviewError) -> Self {
        match err {
            PreviewError::InvalidPattern { pattern, source } => AppError::InvalidPattern {
                pattern,
                detail: source.to_string(),
            },
        }
    }
}

impl From<UndoStoreError> for AppError {
    fn from(err: UndoStoreError) -> Self {
        AppError::UndoRecordError {
            message: err.to_string(),
        }
    }
}

impl From<RenameError> for AppError {
    fn from(err: RenameError) -> Self {
        match err {
            RenameError::DuplicateTarget { names } => AppError::DuplicateTargets { names },
            RenameError::RenameFailed {
                from,
                to,
                applied,
                source,
            } => AppError::RenameError {
                from,
                to,
                applied,
                source,
            },
            RenameError::UndoPersist { applied, source } => AppError::UndoPersistError {
                applied,
                message: source.to_string(),
            },
            RenameError::UnsafeUndoEntry { name } => AppError::UndoRecordError {
                message: format!("entry '{}' is not a plain file name", name),
            },
            RenameError::NoUndoRecord { path } => AppError::NoUndoRecord { path },
            RenameError::UndoRecord(e) => e.into(),
        }
    }
}

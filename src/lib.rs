pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod preview;
pub mod progress;
pub mod rename;
pub mod scanner;
pub mod undo;

pub use config::{config_from_env, Config};
pub use error::{AppError, ExitCode};
pub use preview::{compute_preview, Preview, PreviewError, SubstituteError, TemplateError};
pub use rename::{PlanEntry, RenameError, RenamePlan, Transactor};
pub use scanner::{ensure_directory, list_files, FileEntry, FileFilter, ScannerError};
pub use undo::{UndoEntry, UndoRecord, UndoStore, UndoStoreError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const UNDO_VERSION: &str = "1.0";

/// Default undo record location, relative to the working directory
pub const DEFAULT_UNDO_FILE: &str = "rename_undo_log.json";

/// "A file currently named `from` should be renamed back to `to`"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoEntry {
    #[serde(rename = "old")]
    pub from: String,

    #[serde(rename = "new")]
    pub to: String,
}

impl UndoEntry {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Inverse mapping of the most recent rename transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoRecord {
    /// When the transaction ran; absent in legacy records
    pub executed_at: Option<DateTime<Utc>>,

    /// Directory the transaction ran in; absent in legacy records
    pub base_directory: Option<PathBuf>,

    pub entries: Vec<UndoEntry>,
}

impl UndoRecord {
    pub fn new(base_directory: PathBuf, entries: Vec<UndoEntry>) -> Self {
        Self {
            executed_at: Some(Utc::now()),
            base_directory: Some(base_directory),
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// On-disk shape of an undo record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct UndoFile {
    /// Schema version for compatibility
    pub version: String,

    pub executed_at: DateTime<Utc>,

    pub base_directory: PathBuf,

    /// Tool version that wrote the record
    pub tool_version: String,

    pub changes: Vec<UndoEntry>,
}

/// Accepts both the versioned object and a bare `[{"old", "new"}]` array
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum StoredRecord {
    Versioned(UndoFile),
    Legacy(Vec<UndoEntry>),
}

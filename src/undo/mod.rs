mod store;
mod types;

pub use store::{UndoStore, UndoStoreError};
pub use types::{UndoEntry, UndoRecord, DEFAULT_UNDO_FILE, UNDO_VERSION};

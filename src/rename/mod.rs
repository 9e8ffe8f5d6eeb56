mod transactor;
mod types;

pub use transactor::{RenameError, Transactor};
pub use types::{PlanEntry, RenamePlan};

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::undo::DEFAULT_UNDO_FILE;

pub const ENV_UNDO_LOG: &str = "REGEX_RENAMER_UNDO_LOG";

/// Runtime settings resolved from the environment and command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub undo_log: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            undo_log: PathBuf::from(DEFAULT_UNDO_FILE),
        }
    }
}

impl Config {
    /// Apply a command-line override on top of this config
    pub fn with_undo_log(mut self, path: Option<&Path>) -> Self {
        if let Some(path) = path {
            self.undo_log = path.to_path_buf();
        }
        self
    }
}

/// Build config from environment variables (call `dotenvy::dotenv()` first)
pub fn config_from_env() -> Config {
    let undo_log = env::var_os(ENV_UNDO_LOG)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_UNDO_FILE));

    debug!(undo_log = ?undo_log, "Configuration loaded");

    Config { undo_log }
}

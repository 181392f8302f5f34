//! REPL configuration from TOML (`[repl]` section)

use crate::config::loader::{ConfigLoader, expand_home};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw REPL configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Show progress bars and spinners while a turn runs
    pub show_progress: bool,
    /// Readline history file; `~/` is expanded
    pub history_file: Option<String>,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}

impl FileReplConfig {
    /// Configured history file, or the per-user default in the data directory
    pub fn history_path(&self) -> Option<PathBuf> {
        self.history_file
            .as_deref()
            .map(expand_home)
            .or_else(ConfigLoader::default_history_path)
    }
}

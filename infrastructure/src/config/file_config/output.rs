//! Output configuration from TOML (`[output]` section)

use cod_domain::OutputFormat;
use serde::{Deserialize, Serialize};

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format (uses domain type)
    pub format: Option<OutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
    /// Print the reasoning trace above the answer
    pub show_thinking: bool,
    /// Print word counts and voting statistics
    pub show_stats: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            show_thinking: true,
            show_stats: true,
        }
    }
}

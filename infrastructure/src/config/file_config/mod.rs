//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod generation;
mod logging;
mod output;
mod proxy;
mod reasoning;
mod repl;
mod self_consistency;

pub use generation::FileGenerationConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use proxy::FileProxyConfig;
pub use reasoning::FileReasoningConfig;
pub use repl::FileReplConfig;
pub use self_consistency::FileSelfConsistencyConfig;

use cod_domain::{ConfigIssue, SessionConfig};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Reasoning method and prompt settings
    pub reasoning: FileReasoningConfig,
    /// Self-consistency voting settings
    pub self_consistency: FileSelfConsistencyConfig,
    /// Model and sampling parameters
    pub generation: FileGenerationConfig,
    /// Completion proxy connection
    pub proxy: FileProxyConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Diagnostic and conversation logs
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Every issue has a fallback, so a config with only warnings still
    /// produces a usable [`SessionConfig`].
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.reasoning.parse_method().1);
        issues.extend(self.reasoning.parse_enhancement().1);
        issues.extend(self.reasoning.parse_word_limit().1);
        issues.extend(self.self_consistency.to_self_consistency().1);
        issues.extend(self.generation.parse_model().1);
        issues.extend(self.generation.to_params().1);
        issues
    }

    /// Session settings described by this file, invalid values replaced by defaults.
    pub fn to_session_config(&self) -> SessionConfig {
        SessionConfig {
            model: self.generation.parse_model().0,
            method: self.reasoning.parse_method().0,
            word_limit: self.reasoning.parse_word_limit().0,
            enhanced_enabled: self.reasoning.enhanced,
            enhancement: self.reasoning.parse_enhancement().0,
            self_consistency: self.self_consistency.to_self_consistency().0,
            generation: self.generation.to_params().0,
        }
    }
}

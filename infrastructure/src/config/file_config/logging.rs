//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};

/// Raw logging configuration from TOML
///
/// # Example
///
/// ```toml
/// [logging]
/// file = "~/.local/state/chain-of-draft/cod.log"
/// conversation_log = "~/.local/state/chain-of-draft/conversation.jsonl"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Diagnostic log file (tracing output), in addition to stderr
    pub file: Option<String>,
    /// JSONL transcript of queries, completions and voting rounds
    pub conversation_log: Option<String>,
}

//! Configuration file loading for chain-of-draft
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `CHAIN_OF_DRAFT_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./cod.toml` or `./.cod.toml`
//! 4. Global: `$XDG_CONFIG_HOME/chain-of-draft/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileGenerationConfig, FileLoggingConfig, FileOutputConfig, FileProxyConfig,
    FileReasoningConfig, FileReplConfig, FileSelfConsistencyConfig,
};
pub use loader::{ConfigError, ConfigLoader, ENV_PREFIX, expand_home};

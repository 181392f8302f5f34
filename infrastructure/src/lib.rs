//! Infrastructure layer for chain-of-draft
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod proxy;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, FileConfig, FileLoggingConfig, FileOutputConfig, FileProxyConfig,
    FileReplConfig, expand_home,
};
pub use logging::JsonlConversationLogger;
pub use proxy::{ProxyLlmGateway, ProxySettings};

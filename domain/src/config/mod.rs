//! Configuration value objects for the domain layer
//!
//! These are domain concepts related to configuration that are
//! used across multiple layers.

mod output_format;
mod session_config;
mod validation;

pub use output_format::OutputFormat;
pub use session_config::{Enhancement, GenerationParams, SelfConsistencyConfig, SessionConfig};
pub use validation::{ConfigIssue, ConfigIssueCode, Severity};

//! Presentation layer for chain-of-draft
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and interactive chat interface.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{ChatRepl, ProgressMode, run_turn};
pub use cli::commands::{Cli, OutputFormat};
pub use config::{OutputConfig, ReplConfig};
pub use output::console::{ConsoleFormatter, set_color_enabled};
pub use progress::reporter::{ProgressReporter, SimpleProgress};

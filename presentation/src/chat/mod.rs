//! Interactive chat module
//!
//! Provides a readline-based interactive chat interface that keeps a
//! thread of earlier turns and lets the user change settings with slash
//! commands.

mod command;
mod repl;
mod turn;

pub use command::{EnhancedChange, ReplCommand, parse_command};
pub use repl::ChatRepl;
pub use turn::{ProgressMode, run_turn};

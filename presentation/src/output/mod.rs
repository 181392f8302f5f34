//! Output formatting for finished chat turns

pub mod console;

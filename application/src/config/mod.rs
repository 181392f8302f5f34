//! Application-level configuration.
//!
//! - [`ExecutionParams`]: per-call timeout for completions

pub mod execution_params;

pub use execution_params::ExecutionParams;

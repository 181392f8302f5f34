//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod run_chat;
pub mod run_voting;
pub(crate) mod shared;

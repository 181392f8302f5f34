//! Self-consistency voting domain
//!
//! Pure tallying over completions that were already generated. Generation
//! itself (the sequential path loop, timeouts, progress) lives in the
//! application layer's `RunVotingUseCase`.
//!
//! # Round lifecycle
//!
//! ```text
//! Idle ─▶ Generating(0..paths) ─▶ Tallying ─▶ Resolved(VotingSession)
//!                                          └▶ no valid responses
//! ```

pub mod session;
pub mod tally;

pub use session::{PathResponse, VotingSession, path_temperature, select_displayed_winner};
pub use tally::VoteTally;

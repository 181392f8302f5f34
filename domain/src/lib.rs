//! Domain layer for chain-of-draft
//!
//! This crate contains the response-processing core: pure string processing
//! and vote tallying with no I/O. It has no dependencies on infrastructure
//! or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Reasoning methods
//!
//! - **Standard**: plain answer, no reasoning trace
//! - **CoT** (Chain of Thought): unconstrained narrative reasoning before the answer
//! - **CoD** (Chain of Draft): terse reasoning steps with a per-step word budget
//!
//! Reasoning and answer are separated by the `####` separator marker.
//!
//! ## Self-consistency
//!
//! Several independent completions are generated, each answer is normalized
//! into a voting key, and the majority key wins.
//!
//! ```text
//! query ─▶ analyze ─▶ select_prompt ─▶ (N × generate) ─▶ segment ─▶ normalize ─▶ tally
//! ```

pub mod config;
pub mod core;
pub mod prompt;
pub mod reasoning;
pub mod session;
pub mod util;
pub mod voting;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigIssueCode, Enhancement, GenerationParams, OutputFormat,
    SelfConsistencyConfig, SessionConfig, Severity,
};
pub use core::{error::DomainError, model::Model, question::Question};
pub use prompt::{PromptTemplate, apply_system_prompt, select_prompt};
pub use reasoning::{
    Complexity, ComplexityProfile, CompletionResult, ReasoningMethod, SEPARATOR, analyze,
    count_words, normalize, segment,
};
pub use session::entities::{Message, Prompt, Role};
pub use voting::{
    PathResponse, VoteTally, VotingSession, path_temperature, select_displayed_winner,
};

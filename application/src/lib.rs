//! Application layer for chain-of-draft
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{CompletionRequest, GatewayError, LlmGateway},
    progress::{NoProgress, VotingProgressNotifier},
};
pub use use_cases::run_chat::{ChatOutcome, RunChatError, RunChatInput, RunChatUseCase};
pub use use_cases::run_voting::{RunVotingError, RunVotingInput, RunVotingUseCase};

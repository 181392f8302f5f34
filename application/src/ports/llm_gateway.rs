//! LLM Gateway port
//!
//! Defines the interface for obtaining completions from a model. The core
//! only ever needs "prompt in, raw text out"; transport, authentication and
//! retries are the adapter's business.

use async_trait::async_trait;
use cod_domain::{GenerationParams, Model, Prompt};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Whether the upstream asked us to come back later (429 or 5xx)
    pub fn is_retryable(&self) -> bool {
        matches!(self, GatewayError::Status { status, .. } if *status == 429 || *status >= 500)
    }
}

/// A single completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: Model,
    pub prompt: Prompt,
    pub params: GenerationParams,
}

impl CompletionRequest {
    pub fn new(model: Model, prompt: Prompt, params: GenerationParams) -> Self {
        Self {
            model,
            prompt,
            params,
        }
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer communicates with LLM providers.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Generate one completion and return its raw text
    async fn generate(&self, request: &CompletionRequest) -> Result<String, GatewayError>;
}

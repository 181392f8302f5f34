//! Reasoning method value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Literal token separating the reasoning trace from the final answer.
pub const SEPARATOR: &str = "####";

/// How the model is asked to reason before answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningMethod {
    /// Plain answer, no system instruction
    Standard,
    /// Chain of Thought: free-form reasoning, then the answer
    Cot,
    /// Chain of Draft: minimal per-step drafts, then the answer
    #[default]
    Cod,
}

impl ReasoningMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasoningMethod::Standard => "standard",
            ReasoningMethod::Cot => "cot",
            ReasoningMethod::Cod => "cod",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ReasoningMethod::Standard => "Standard",
            ReasoningMethod::Cot => "Chain of Thought",
            ReasoningMethod::Cod => "Chain of Draft",
        }
    }

    /// Whether completions under this method carry a thinking region
    pub fn has_thinking(&self) -> bool {
        !matches!(self, ReasoningMethod::Standard)
    }

    pub fn all() -> [ReasoningMethod; 3] {
        [
            ReasoningMethod::Standard,
            ReasoningMethod::Cot,
            ReasoningMethod::Cod,
        ]
    }
}

impl std::fmt::Display for ReasoningMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReasoningMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "none" => Ok(ReasoningMethod::Standard),
            "cot" | "chain-of-thought" => Ok(ReasoningMethod::Cot),
            "cod" | "chain-of-draft" => Ok(ReasoningMethod::Cod),
            other => Err(DomainError::UnknownReasoningMethod(other.to_string())),
        }
    }
}

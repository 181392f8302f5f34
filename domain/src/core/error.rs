//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Segmentation, normalization and classification are total functions and
/// never produce these; they come from validating user-facing values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Unknown reasoning method: {0} (expected standard, cot or cod)")]
    UnknownReasoningMethod(String),

    #[error("Unknown enhancement mode: {0} (expected adaptive or standard)")]
    UnknownEnhancement(String),

    #[error("Unknown output format: {0} (expected full, answer or json)")]
    UnknownOutputFormat(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_error_display() {
        let error = DomainError::Cancelled;
        assert_eq!(error.to_string(), "Operation cancelled");
    }

    #[test]
    fn test_is_cancelled_check() {
        assert!(DomainError::Cancelled.is_cancelled());
        assert!(!DomainError::UnknownReasoningMethod("x".to_string()).is_cancelled());
    }

    #[test]
    fn test_unknown_method_mentions_valid_values() {
        let msg = DomainError::UnknownReasoningMethod("tot".to_string()).to_string();
        assert!(msg.contains("tot"));
        assert!(msg.contains("cod"));
    }
}

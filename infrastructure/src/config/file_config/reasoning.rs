//! Reasoning configuration from TOML (`[reasoning]` section)

use cod_domain::{ConfigIssue, ConfigIssueCode, Enhancement, ReasoningMethod};
use serde::{Deserialize, Serialize};

/// Raw reasoning configuration from TOML
///
/// # Example
///
/// ```toml
/// [reasoning]
/// method = "cod"            # "standard", "cot" or "cod"
/// word_limit = 5            # per-step word budget for CoD
/// enhanced = true           # allow the enhanced prompts
/// enhancement = "adaptive"  # "adaptive" or "standard"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReasoningConfig {
    pub method: String,
    pub word_limit: usize,
    pub enhanced: bool,
    pub enhancement: String,
}

impl Default for FileReasoningConfig {
    fn default() -> Self {
        Self {
            method: "cod".to_string(),
            word_limit: 5,
            enhanced: false,
            enhancement: "adaptive".to_string(),
        }
    }
}

impl FileReasoningConfig {
    /// Parse method string into ReasoningMethod, returning warnings on failure.
    pub fn parse_method(&self) -> (ReasoningMethod, Vec<ConfigIssue>) {
        match self.method.parse::<ReasoningMethod>() {
            Ok(method) => (method, vec![]),
            Err(_) => {
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "reasoning.method".to_string(),
                        value: self.method.clone(),
                        valid_values: ReasoningMethod::all()
                            .iter()
                            .map(|m| m.as_str().to_string())
                            .collect(),
                    },
                    format!(
                        "reasoning.method: unknown value '{}', falling back to 'cod'",
                        self.method
                    ),
                );
                (ReasoningMethod::default(), vec![issue])
            }
        }
    }

    pub fn parse_enhancement(&self) -> (Enhancement, Vec<ConfigIssue>) {
        match self.enhancement.parse::<Enhancement>() {
            Ok(enhancement) => (enhancement, vec![]),
            Err(_) => {
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "reasoning.enhancement".to_string(),
                        value: self.enhancement.clone(),
                        valid_values: vec!["adaptive".to_string(), "standard".to_string()],
                    },
                    format!(
                        "reasoning.enhancement: unknown value '{}', falling back to 'adaptive'",
                        self.enhancement
                    ),
                );
                (Enhancement::default(), vec![issue])
            }
        }
    }

    /// Word limit, with 0 replaced by the default
    pub fn parse_word_limit(&self) -> (usize, Vec<ConfigIssue>) {
        if self.word_limit > 0 {
            return (self.word_limit, vec![]);
        }
        let fallback = Self::default().word_limit;
        let issue = ConfigIssue::warning(
            ConfigIssueCode::OutOfRange {
                field: "reasoning.word_limit".to_string(),
                value: self.word_limit.to_string(),
                expected: "at least 1".to_string(),
            },
            format!(
                "reasoning.word_limit: must be at least 1, falling back to {}",
                fallback
            ),
        );
        (fallback, vec![issue])
    }
}

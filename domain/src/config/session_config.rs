//! Per-session reasoning settings.
//!
//! [`SessionConfig`] is an immutable value handed to every core call. A
//! settings change produces a new value through the `with_*` builders
//! instead of mutating shared state.

use crate::core::error::DomainError;
use crate::core::model::Model;
use crate::prompt::select_prompt;
use crate::reasoning::{ComplexityProfile, ReasoningMethod};
use serde::{Deserialize, Serialize};

/// Whether the enhanced prompts are chosen adaptively
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Enhancement {
    /// Enhanced prompt for queries profiled as complex
    #[default]
    Adaptive,
    /// Always the standard prompt
    Standard,
}

impl Enhancement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Enhancement::Adaptive => "adaptive",
            Enhancement::Standard => "standard",
        }
    }
}

impl std::fmt::Display for Enhancement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Enhancement {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "adaptive" => Ok(Enhancement::Adaptive),
            "standard" => Ok(Enhancement::Standard),
            other => Err(DomainError::UnknownEnhancement(other.to_string())),
        }
    }
}

/// Sampling parameters forwarded to the completion proxy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
    pub frequency_penalty: f64,
    pub presence_penalty: f64,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1024,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        }
    }
}

impl GenerationParams {
    /// Same parameters at a different temperature
    pub fn at_temperature(self, temperature: f64) -> Self {
        Self {
            temperature,
            ..self
        }
    }
}

/// Self-consistency voting settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelfConsistencyConfig {
    pub enabled: bool,
    /// Number of independent generations per round
    pub paths: usize,
    /// Base temperature of the diversity ramp
    pub temperature: f64,
}

impl Default for SelfConsistencyConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            paths: 3,
            temperature: 0.7,
        }
    }
}

/// Everything the core needs to know about the current session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub model: Model,
    pub method: ReasoningMethod,
    /// Per-step word budget for CoD
    pub word_limit: usize,
    pub enhanced_enabled: bool,
    pub enhancement: Enhancement,
    pub self_consistency: SelfConsistencyConfig,
    pub generation: GenerationParams,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            model: Model::default(),
            method: ReasoningMethod::default(),
            word_limit: 5,
            enhanced_enabled: false,
            enhancement: Enhancement::default(),
            self_consistency: SelfConsistencyConfig::default(),
            generation: GenerationParams::default(),
        }
    }
}

impl SessionConfig {
    // ==================== Builder Methods ====================

    pub fn with_model(self, model: Model) -> Self {
        Self { model, ..self }
    }

    pub fn with_method(self, method: ReasoningMethod) -> Self {
        Self { method, ..self }
    }

    pub fn with_word_limit(self, word_limit: usize) -> Self {
        Self { word_limit, ..self }
    }

    pub fn with_enhanced(self, enabled: bool) -> Self {
        Self {
            enhanced_enabled: enabled,
            ..self
        }
    }

    pub fn with_enhancement(self, enhancement: Enhancement) -> Self {
        Self {
            enhancement,
            ..self
        }
    }

    pub fn with_self_consistency(self, enabled: bool) -> Self {
        Self {
            self_consistency: SelfConsistencyConfig {
                enabled,
                ..self.self_consistency
            },
            ..self
        }
    }

    pub fn with_paths(self, paths: usize) -> Self {
        Self {
            self_consistency: SelfConsistencyConfig {
                paths,
                ..self.self_consistency
            },
            ..self
        }
    }

    pub fn with_voting_temperature(self, temperature: f64) -> Self {
        Self {
            self_consistency: SelfConsistencyConfig {
                temperature,
                ..self.self_consistency
            },
            ..self
        }
    }

    pub fn with_generation(self, generation: GenerationParams) -> Self {
        Self { generation, ..self }
    }

    // ==================== Queries ====================

    /// Whether turns run a voting round instead of a single completion
    pub fn voting_enabled(&self) -> bool {
        self.self_consistency.enabled && self.self_consistency.paths > 0
    }

    /// System prompt for a query with the given profile
    pub fn system_prompt_for(&self, profile: &ComplexityProfile) -> String {
        select_prompt(
            self.method,
            self.enhanced_enabled,
            self.enhancement,
            profile,
            self.word_limit,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reasoning::Complexity;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.method, ReasoningMethod::Cod);
        assert_eq!(config.word_limit, 5);
        assert!(!config.enhanced_enabled);
        assert_eq!(config.enhancement, Enhancement::Adaptive);
        assert!(!config.voting_enabled());
        assert_eq!(config.self_consistency.paths, 3);
    }

    #[test]
    fn test_builders_return_new_values() {
        let base = SessionConfig::default();
        let changed = base
            .clone()
            .with_method(ReasoningMethod::Cot)
            .with_word_limit(8)
            .with_self_consistency(true)
            .with_paths(5);

        assert_eq!(base.method, ReasoningMethod::Cod);
        assert_eq!(changed.method, ReasoningMethod::Cot);
        assert_eq!(changed.word_limit, 8);
        assert!(changed.voting_enabled());
        assert_eq!(changed.self_consistency.paths, 5);
        assert_eq!(changed.self_consistency.temperature, 0.7);
    }

    #[test]
    fn test_zero_paths_disables_voting() {
        let config = SessionConfig::default()
            .with_self_consistency(true)
            .with_paths(0);
        assert!(!config.voting_enabled());
    }

    #[test]
    fn test_system_prompt_for_uses_settings() {
        let config = SessionConfig::default()
            .with_word_limit(9)
            .with_enhanced(true);
        let normal = ComplexityProfile::default();
        assert!(config.system_prompt_for(&normal).contains("with 9 words at most"));

        let complex = ComplexityProfile {
            complexity: Complexity::Complex,
            ..Default::default()
        };
        assert!(config.system_prompt_for(&complex).contains("per step"));
    }

    #[test]
    fn test_enhancement_parse() {
        assert_eq!("Adaptive".parse::<Enhancement>().unwrap(), Enhancement::Adaptive);
        assert!("sometimes".parse::<Enhancement>().is_err());
    }

    #[test]
    fn test_at_temperature_keeps_other_params() {
        let params = GenerationParams {
            max_tokens: 300,
            ..Default::default()
        }
        .at_temperature(0.95);
        assert_eq!(params.temperature, 0.95);
        assert_eq!(params.max_tokens, 300);
    }
}

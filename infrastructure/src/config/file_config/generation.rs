//! Generation configuration from TOML (`[generation]` section)

use super::self_consistency::TEMPERATURE_RANGE;
use cod_domain::{ConfigIssue, ConfigIssueCode, GenerationParams, Model};
use serde::{Deserialize, Serialize};

/// Raw generation configuration from TOML
///
/// # Example
///
/// ```toml
/// [generation]
/// model = "claude-3-7-sonnet-20250219"
/// temperature = 0.7
/// max_tokens = 1024
/// top_p = 1.0
/// frequency_penalty = 0.0
/// presence_penalty = 0.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
    pub frequency_penalty: f64,
    pub presence_penalty: f64,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        let params = GenerationParams::default();
        Self {
            model: Model::default().to_string(),
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            top_p: params.top_p,
            frequency_penalty: params.frequency_penalty,
            presence_penalty: params.presence_penalty,
        }
    }
}

impl FileGenerationConfig {
    /// Parse the model name, collecting an issue for an empty name.
    pub fn parse_model(&self) -> (Model, Vec<ConfigIssue>) {
        if self.model.trim().is_empty() {
            let issue = ConfigIssue::error(
                ConfigIssueCode::EmptyModelName {
                    field: "generation.model".to_string(),
                },
                "generation.model: model name cannot be empty",
            );
            return (Model::default(), vec![issue]);
        }
        (Model::from(self.model.as_str()), vec![])
    }

    pub fn to_params(&self) -> (GenerationParams, Vec<ConfigIssue>) {
        let defaults = GenerationParams::default();
        let mut issues = Vec::new();

        let temperature = if TEMPERATURE_RANGE.contains(&self.temperature) {
            self.temperature
        } else {
            issues.push(out_of_range(
                "generation.temperature",
                self.temperature,
                "0.0 to 2.0",
                defaults.temperature,
            ));
            defaults.temperature
        };

        let top_p = if (0.0..=1.0).contains(&self.top_p) {
            self.top_p
        } else {
            issues.push(out_of_range("generation.top_p", self.top_p, "0.0 to 1.0", defaults.top_p));
            defaults.top_p
        };

        let max_tokens = if self.max_tokens > 0 {
            self.max_tokens
        } else {
            issues.push(out_of_range(
                "generation.max_tokens",
                0,
                "at least 1",
                defaults.max_tokens,
            ));
            defaults.max_tokens
        };

        (
            GenerationParams {
                temperature,
                max_tokens,
                top_p,
                frequency_penalty: self.frequency_penalty,
                presence_penalty: self.presence_penalty,
            },
            issues,
        )
    }
}

fn out_of_range(
    field: &str,
    value: impl std::fmt::Display,
    expected: &str,
    fallback: impl std::fmt::Display,
) -> ConfigIssue {
    ConfigIssue::warning(
        ConfigIssueCode::OutOfRange {
            field: field.to_string(),
            value: value.to_string(),
            expected: expected.to_string(),
        },
        format!(
            "{}: {} is out of range ({}), falling back to {}",
            field, value, expected, fallback
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_model_is_an_error() {
        let config = FileGenerationConfig {
            model: "  ".to_string(),
            ..Default::default()
        };
        let (model, issues) = config.parse_model();
        assert_eq!(model, Model::default());
        assert!(issues[0].is_error());
    }

    #[test]
    fn test_custom_model_passes_through() {
        let config = FileGenerationConfig {
            model: "my-proxy-model".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.parse_model().0,
            Model::Custom("my-proxy-model".to_string())
        );
    }

    #[test]
    fn test_out_of_range_params_fall_back() {
        let config = FileGenerationConfig {
            temperature: 3.5,
            top_p: 1.5,
            max_tokens: 0,
            ..Default::default()
        };
        let (params, issues) = config.to_params();
        assert_eq!(params, GenerationParams::default());
        assert_eq!(issues.len(), 3);
    }
}

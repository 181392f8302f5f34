//! Self-consistency configuration from TOML (`[self_consistency]` section)

use cod_domain::{ConfigIssue, ConfigIssueCode, SelfConsistencyConfig};
use serde::{Deserialize, Serialize};

/// Accepted sampling temperature range
pub(super) const TEMPERATURE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=2.0;

/// Raw self-consistency configuration from TOML
///
/// # Example
///
/// ```toml
/// [self_consistency]
/// enabled = true
/// paths = 5          # independent generations per question
/// temperature = 0.7  # base of the per-path temperature ramp
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSelfConsistencyConfig {
    pub enabled: bool,
    pub paths: usize,
    pub temperature: f64,
}

impl Default for FileSelfConsistencyConfig {
    fn default() -> Self {
        let defaults = SelfConsistencyConfig::default();
        Self {
            enabled: defaults.enabled,
            paths: defaults.paths,
            temperature: defaults.temperature,
        }
    }
}

impl FileSelfConsistencyConfig {
    /// Convert to the domain settings, replacing invalid values with defaults.
    pub fn to_self_consistency(&self) -> (SelfConsistencyConfig, Vec<ConfigIssue>) {
        let defaults = SelfConsistencyConfig::default();
        let mut issues = Vec::new();

        let paths = if self.paths == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "self_consistency.paths".to_string(),
                    value: "0".to_string(),
                    expected: "at least 1".to_string(),
                },
                format!(
                    "self_consistency.paths: must be at least 1, falling back to {}",
                    defaults.paths
                ),
            ));
            defaults.paths
        } else {
            self.paths
        };

        let temperature = if TEMPERATURE_RANGE.contains(&self.temperature) {
            self.temperature
        } else {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "self_consistency.temperature".to_string(),
                    value: self.temperature.to_string(),
                    expected: "0.0 to 2.0".to_string(),
                },
                format!(
                    "self_consistency.temperature: {} is out of range, falling back to {}",
                    self.temperature, defaults.temperature
                ),
            ));
            defaults.temperature
        };

        (
            SelfConsistencyConfig {
                enabled: self.enabled,
                paths,
                temperature,
            },
            issues,
        )
    }
}

//! Model value object representing a hosted LLM

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Models reachable through the completion proxy (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Model {
    #[default]
    ClaudeSonnet37,
    ClaudeSonnet35,
    ClaudeHaiku35,
    ClaudeOpus3,
    /// Any other identifier, passed through to the proxy verbatim
    Custom(String),
}

impl Model {
    /// Get the API identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::ClaudeSonnet37 => "claude-3-7-sonnet-20250219",
            Model::ClaudeSonnet35 => "claude-3-5-sonnet-20241022",
            Model::ClaudeHaiku35 => "claude-3-5-haiku-20241022",
            Model::ClaudeOpus3 => "claude-3-opus-20240229",
            Model::Custom(s) => s,
        }
    }

    /// Short, human-friendly label
    pub fn display_name(&self) -> &str {
        match self {
            Model::ClaudeSonnet37 => "Claude 3.7 Sonnet",
            Model::ClaudeSonnet35 => "Claude 3.5 Sonnet",
            Model::ClaudeHaiku35 => "Claude 3.5 Haiku",
            Model::ClaudeOpus3 => "Claude 3 Opus",
            Model::Custom(s) => s,
        }
    }

    pub fn known_models() -> Vec<Model> {
        vec![
            Model::ClaudeSonnet37,
            Model::ClaudeSonnet35,
            Model::ClaudeHaiku35,
            Model::ClaudeOpus3,
        ]
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "claude-3-7-sonnet-20250219" | "claude-3-7-sonnet" => Model::ClaudeSonnet37,
            "claude-3-5-sonnet-20241022" | "claude-3-5-sonnet" => Model::ClaudeSonnet35,
            "claude-3-5-haiku-20241022" | "claude-3-5-haiku" => Model::ClaudeHaiku35,
            "claude-3-opus-20240229" | "claude-3-opus" => Model::ClaudeOpus3,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(model) => model,
            Err(never) => match never {},
        }
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::from(s.as_str()))
    }
}

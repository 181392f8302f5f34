//! CLI command definitions

use clap::{Parser, ValueEnum};
use cod_domain::{Enhancement, Model, ReasoningMethod, SessionConfig};
use std::path::PathBuf;

/// Output format for a finished turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Thinking, answer, word counts and voting statistics
    Full,
    /// Only the final answer
    Answer,
    /// JSON output
    Json,
}

impl From<OutputFormat> for cod_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => cod_domain::OutputFormat::Full,
            OutputFormat::Answer => cod_domain::OutputFormat::Answer,
            OutputFormat::Json => cod_domain::OutputFormat::Json,
        }
    }
}

/// Reasoning method selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    Standard,
    Cot,
    Cod,
}

impl From<MethodArg> for ReasoningMethod {
    fn from(method: MethodArg) -> Self {
        match method {
            MethodArg::Standard => ReasoningMethod::Standard,
            MethodArg::Cot => ReasoningMethod::Cot,
            MethodArg::Cod => ReasoningMethod::Cod,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EnhancementArg {
    Adaptive,
    Standard,
}

impl From<EnhancementArg> for Enhancement {
    fn from(enhancement: EnhancementArg) -> Self {
        match enhancement {
            EnhancementArg::Adaptive => Enhancement::Adaptive,
            EnhancementArg::Standard => Enhancement::Standard,
        }
    }
}

/// CLI arguments for chain-of-draft
#[derive(Parser, Debug)]
#[command(name = "chain-of-draft")]
#[command(author, version, about = "Chain-of-Draft prompting with self-consistency voting")]
#[command(long_about = r#"
Chain-of-Draft asks the model to reason in terse draft steps of a few words
each before giving its answer after a '####' separator. Chain of Thought and
plain answers are available too.

With --vote the question is sampled several times at rising temperatures and
the majority answer wins.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./cod.toml          Project-level config
3. ~/.config/chain-of-draft/config.toml   Global config

Example:
  chain-of-draft "Jason had 20 lollipops. He gave Denny some. Now he has 12. How many did he give?"
  chain-of-draft --method cot --output full "Is 91 prime?"
  chain-of-draft --vote --paths 5 "What is 17 * 23?"
  chain-of-draft --chat
"#)]
pub struct Cli {
    /// The question to ask (not required in chat mode)
    pub query: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Reasoning method
    #[arg(long, value_enum, value_name = "METHOD")]
    pub method: Option<MethodArg>,

    /// Words allowed per draft step (Chain of Draft)
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub word_limit: Option<u32>,

    /// Use the enhanced prompts
    #[arg(short, long)]
    pub enhanced: bool,

    /// How enhanced prompts are chosen
    #[arg(long, value_enum, value_name = "MODE")]
    pub enhancement: Option<EnhancementArg>,

    /// Run a self-consistency voting round
    #[arg(long)]
    pub vote: bool,

    /// Number of voting paths
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub paths: Option<u32>,

    /// Base temperature of voting paths
    #[arg(short, long, value_name = "T")]
    pub temperature: Option<f64>,

    /// Model to ask
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the file configuration
    pub fn apply_overrides(&self, mut config: SessionConfig) -> SessionConfig {
        if let Some(method) = self.method {
            config = config.with_method(method.into());
        }
        if let Some(limit) = self.word_limit {
            config = config.with_word_limit(limit as usize);
        }
        if self.enhanced {
            config = config.with_enhanced(true);
        }
        if let Some(enhancement) = self.enhancement {
            config = config.with_enhancement(enhancement.into());
        }
        if self.vote {
            config = config.with_self_consistency(true);
        }
        if let Some(paths) = self.paths {
            config = config.with_paths(paths as usize);
        }
        if let Some(temperature) = self.temperature {
            config = config.with_voting_temperature(temperature);
        }
        if let Some(model) = &self.model {
            config = config.with_model(Model::from(model.as_str()));
        }
        config
    }
}

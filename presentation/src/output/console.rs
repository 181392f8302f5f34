//! Console output formatter for chat turns

use crate::config::OutputConfig;
use cod_application::ChatOutcome;
use cod_domain::{CompletionResult, OutputFormat, SessionConfig, VotingSession};
use colored::Colorize;
use serde::Serialize;

/// Turn terminal colors on or off for everything this crate prints
pub fn set_color_enabled(enabled: bool) {
    if enabled {
        colored::control::unset_override();
    } else {
        colored::control::set_override(false);
    }
}

/// Formats chat turns for console display
#[derive(Debug, Clone)]
pub struct ConsoleFormatter {
    show_thinking: bool,
    show_stats: bool,
}

impl Default for ConsoleFormatter {
    fn default() -> Self {
        Self {
            show_thinking: true,
            show_stats: true,
        }
    }
}

/// JSON view of a chat turn
#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    query: &'a str,
    method: &'a str,
    complexity: &'a str,
    thinking: Option<&'a str>,
    answer: &'a str,
    thinking_word_count: usize,
    answer_word_count: usize,
    total_word_count: usize,
    draft_steps: usize,
    steps_over_limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    voting: Option<JsonVoting<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonVoting<'a> {
    paths: usize,
    temperature: f64,
    winning_answer: &'a str,
    agreement_count: usize,
    agreement_percentage: f64,
    failed_paths: &'a [usize],
    votes: Vec<JsonVote<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonVote<'a> {
    answer: &'a str,
    votes: usize,
}

impl ConsoleFormatter {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            show_thinking: config.show_thinking,
            show_stats: config.show_stats,
        }
    }

    /// Render a turn in the requested format
    pub fn render(&self, query: &str, outcome: &ChatOutcome, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => self.format_full(query, outcome),
            OutputFormat::Answer => Self::format_answer(outcome),
            OutputFormat::Json => Self::format_json(query, outcome),
        }
    }

    /// Thinking, answer and statistics
    pub fn format_full(&self, query: &str, outcome: &ChatOutcome) -> String {
        let result = &outcome.result;
        let mut output = String::new();

        output.push_str(&Self::header(result.method.display_name()));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Question:".cyan().bold(), query));
        output.push_str(&format!(
            "{} {}\n",
            "Complexity:".cyan().bold(),
            outcome.profile.complexity
        ));

        if self.show_thinking
            && let Some(thinking) = &result.thinking
        {
            output.push_str(&Self::section_header("Thinking"));
            output.push_str(&Self::indent(thinking, "  ").dimmed().to_string());
            output.push('\n');
        }

        output.push_str(&Self::section_header("Answer"));
        output.push_str(result.display_answer());
        output.push('\n');

        if self.show_stats {
            output.push_str(&Self::section_header("Stats"));
            output.push_str(&Self::format_word_stats(result));
            if let Some(voting) = &outcome.voting {
                output.push_str(&Self::format_voting_stats(voting));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Only the final answer
    pub fn format_answer(outcome: &ChatOutcome) -> String {
        format!("{}\n", outcome.result.display_answer())
    }

    pub fn format_json(query: &str, outcome: &ChatOutcome) -> String {
        let result = &outcome.result;
        let view = JsonOutput {
            query,
            method: result.method.as_str(),
            complexity: outcome.profile.complexity.as_str(),
            thinking: result.thinking.as_deref(),
            answer: result.display_answer(),
            thinking_word_count: result.thinking_word_count,
            answer_word_count: result.answer_word_count,
            total_word_count: result.total_word_count(),
            draft_steps: result.draft_steps,
            steps_over_limit: result.steps_over_limit,
            voting: outcome.voting.as_ref().map(|v| JsonVoting {
                paths: v.paths,
                temperature: v.temperature,
                winning_answer: &v.winning_answer,
                agreement_count: v.agreement_count,
                agreement_percentage: v.agreement_percentage,
                failed_paths: &v.failed_paths,
                votes: v
                    .tally
                    .entries()
                    .iter()
                    .map(|e| JsonVote {
                        answer: &e.key,
                        votes: e.votes,
                    })
                    .collect(),
            }),
        };
        serde_json::to_string_pretty(&view).unwrap_or_else(|_| "{}".to_string())
    }

    /// Current session settings, as shown by `/settings`
    pub fn format_settings(config: &SessionConfig) -> String {
        let on_off = |b: bool| if b { "on" } else { "off" };
        let mut output = String::new();
        output.push_str(&format!("{}\n", "Settings".cyan().bold()));
        output.push_str(&format!("  model:       {}\n", config.model));
        output.push_str(&format!(
            "  method:      {} ({})\n",
            config.method,
            config.method.display_name()
        ));
        output.push_str(&format!("  word limit:  {}\n", config.word_limit));
        output.push_str(&format!(
            "  enhanced:    {} ({})\n",
            on_off(config.enhanced_enabled),
            config.enhancement
        ));
        output.push_str(&format!(
            "  voting:      {} ({} paths, temperature {:.2})\n",
            on_off(config.self_consistency.enabled),
            config.self_consistency.paths,
            config.self_consistency.temperature
        ));
        output
    }

    fn format_word_stats(result: &CompletionResult) -> String {
        let mut output = format!(
            "  words: {} thinking + {} answer = {}\n",
            result.thinking_word_count,
            result.answer_word_count,
            result.total_word_count()
        );
        if result.draft_steps > 0 {
            let over = if result.steps_over_limit > 0 {
                format!("{} over limit", result.steps_over_limit)
                    .yellow()
                    .to_string()
            } else {
                "all within limit".green().to_string()
            };
            output.push_str(&format!("  draft steps: {} ({})\n", result.draft_steps, over));
        }
        output
    }

    fn format_voting_stats(voting: &VotingSession) -> String {
        let agreement = format!(
            "{}/{} paths agree ({:.0}%)",
            voting.agreement_count, voting.paths, voting.agreement_percentage
        );
        let agreement = if voting.is_unanimous() {
            agreement.green()
        } else {
            agreement.yellow()
        };

        let mut output = format!("  votes: {}\n", voting.tally.summary(voting.paths));
        output.push_str(&format!("  consensus: {}\n", agreement));
        if !voting.failed_paths.is_empty() {
            let failed: Vec<String> = voting
                .failed_paths
                .iter()
                .map(|i| (i + 1).to_string())
                .collect();
            output.push_str(&format!(
                "  {} {}\n",
                "failed paths:".red(),
                failed.join(", ")
            ));
        }
        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

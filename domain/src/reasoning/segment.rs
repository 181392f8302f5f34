//! Message segmentation: thinking trace vs. final answer.
//!
//! | Method | Split rule | Fallback |
//! |--------|------------|----------|
//! | `cod` | first `####` | whole text is the answer |
//! | `cot` | first `####`, else first "final answer" phrase | whole text is the answer |
//! | `standard` | none | — |
//!
//! The stored thinking text is never rewritten. For CoD the thinking is
//! additionally split into draft steps, which only feed the step counters.

use super::method::{ReasoningMethod, SEPARATOR};
use super::normalize::count_words;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// "Final answer" phrases recognised when a CoT completion has no separator.
static FINAL_ANSWER_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:the final answer is|final answer is|final answer\s*(?:\*\*)?\s*:|answer\s*(?:\*\*)?\s*:)",
    )
    .unwrap()
});

/// Sentence-period boundary (a period followed by whitespace or the end) or a line break.
static STEP_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.(?:\s+|$)|\n+").unwrap());

/// One model completion, split under a reasoning method.
///
/// Produced once per model call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResult {
    pub raw_text: String,
    pub method: ReasoningMethod,
    pub thinking: Option<String>,
    pub answer: Option<String>,
    pub thinking_word_count: usize,
    pub answer_word_count: usize,
    /// Number of draft steps in the thinking (CoD only)
    pub draft_steps: usize,
    /// Draft steps longer than the per-step word limit (CoD only)
    pub steps_over_limit: usize,
}

impl CompletionResult {
    fn empty(raw_text: &str, method: ReasoningMethod) -> Self {
        Self {
            raw_text: raw_text.to_string(),
            method,
            thinking: None,
            answer: None,
            thinking_word_count: 0,
            answer_word_count: 0,
            draft_steps: 0,
            steps_over_limit: 0,
        }
    }

    /// Word count attributed to the whole completion
    pub fn total_word_count(&self) -> usize {
        self.thinking_word_count + self.answer_word_count
    }

    /// Whether this completion can cast a vote
    pub fn has_answer(&self) -> bool {
        self.answer.is_some()
    }

    /// Text to show when only one field is wanted
    pub fn display_answer(&self) -> &str {
        self.answer.as_deref().unwrap_or(self.raw_text.as_str())
    }
}

/// Split a raw completion into thinking and answer.
///
/// Never fails: a missing separator means the whole text is the answer.
pub fn segment(raw_text: &str, method: ReasoningMethod, word_limit: usize) -> CompletionResult {
    if raw_text.trim().is_empty() {
        return CompletionResult::empty(raw_text, method);
    }

    let (thinking, answer) = match method {
        ReasoningMethod::Standard => (None, non_blank(raw_text.trim())),
        ReasoningMethod::Cod => split_at_separator(raw_text)
            .unwrap_or_else(|| (None, non_blank(raw_text.trim()))),
        ReasoningMethod::Cot => split_at_separator(raw_text)
            .or_else(|| split_at_final_answer_phrase(raw_text))
            .unwrap_or_else(|| (None, non_blank(raw_text.trim()))),
    };

    let (draft_steps, steps_over_limit) = match (&method, &thinking) {
        (ReasoningMethod::Cod, Some(text)) => {
            let steps = draft_steps(text);
            let over = if word_limit == 0 {
                0
            } else {
                steps.iter().filter(|s| count_words(s) > word_limit).count()
            };
            (steps.len(), over)
        }
        _ => (0, 0),
    };

    // Counted on the joined text so an equation spanning the separator is
    // still one word and the two counts add up to the total.
    let total_words = count_words(&format!(
        "{} {}",
        thinking.as_deref().unwrap_or(""),
        answer.as_deref().unwrap_or("")
    ));
    let thinking_word_count = thinking
        .as_deref()
        .map(count_words)
        .unwrap_or(0)
        .min(total_words);

    CompletionResult {
        raw_text: raw_text.to_string(),
        method,
        thinking_word_count,
        answer_word_count: total_words - thinking_word_count,
        thinking,
        answer,
        draft_steps,
        steps_over_limit,
    }
}

/// Split at the first separator. The thinking keeps its exact text; any
/// later separators stay inside the answer.
fn split_at_separator(raw_text: &str) -> Option<(Option<String>, Option<String>)> {
    let (before, after) = raw_text.split_once(SEPARATOR)?;
    Some((non_blank_verbatim(before), non_blank(after.trim())))
}

fn split_at_final_answer_phrase(raw_text: &str) -> Option<(Option<String>, Option<String>)> {
    let m = FINAL_ANSWER_PHRASE.find(raw_text)?;
    let before = &raw_text[..m.start()];
    let after = raw_text[m.end()..]
        .trim_start_matches(|c: char| c == '*' || c == ':' || c.is_whitespace())
        .trim();
    Some((non_blank_verbatim(before), non_blank(after)))
}

/// Discrete draft steps of a CoD thinking trace.
fn draft_steps(thinking: &str) -> Vec<&str> {
    STEP_BOUNDARY
        .split(thinking)
        .map(|s| s.trim().trim_start_matches(['-', '*', '•']).trim())
        .filter(|s| !s.is_empty())
        .collect()
}

fn non_blank(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}

fn non_blank_verbatim(s: &str) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined_count(result: &CompletionResult) -> usize {
        let joined = format!(
            "{} {}",
            result.thinking.as_deref().unwrap_or(""),
            result.answer.as_deref().unwrap_or("")
        );
        count_words(&joined)
    }

    // ==================== CoD ====================

    #[test]
    fn test_cod_split_at_separator() {
        let result = segment("Step one. Step two. #### 42", ReasoningMethod::Cod, 5);
        assert_eq!(result.thinking.as_deref(), Some("Step one. Step two. "));
        assert_eq!(result.answer.as_deref(), Some("42"));
        assert_eq!(result.draft_steps, 2);
        assert_eq!(result.steps_over_limit, 0);
        assert_eq!(result.thinking_word_count, 4);
        assert_eq!(result.answer_word_count, 1);
    }

    #[test]
    fn test_cod_missing_separator_falls_back() {
        let result = segment("No separator here", ReasoningMethod::Cod, 5);
        assert_eq!(result.thinking, None);
        assert_eq!(result.answer.as_deref(), Some("No separator here"));
        assert_eq!(result.draft_steps, 0);
    }

    #[test]
    fn test_cod_multiple_separators_split_at_first() {
        let result = segment("a. #### 8 #### extra", ReasoningMethod::Cod, 5);
        assert_eq!(result.thinking.as_deref(), Some("a. "));
        assert_eq!(result.answer.as_deref(), Some("8 #### extra"));
    }

    #[test]
    fn test_cod_steps_over_limit() {
        let raw = "20 - 12 = 8.\nJason had twenty lollipops at the very start of the day.\n#### 8";
        let result = segment(raw, ReasoningMethod::Cod, 5);
        assert_eq!(result.draft_steps, 2);
        assert_eq!(result.steps_over_limit, 1);
    }

    #[test]
    fn test_cod_zero_word_limit_disables_check() {
        let raw = "a very long draft step with many words. #### 1";
        let result = segment(raw, ReasoningMethod::Cod, 0);
        assert_eq!(result.draft_steps, 1);
        assert_eq!(result.steps_over_limit, 0);
    }

    #[test]
    fn test_cod_decimal_is_not_a_step_boundary() {
        let result = segment("price 3.5 each. times 2. #### 7", ReasoningMethod::Cod, 5);
        assert_eq!(result.draft_steps, 2);
    }

    #[test]
    fn test_cod_empty_thinking_before_separator() {
        let result = segment("   #### 42", ReasoningMethod::Cod, 5);
        assert_eq!(result.thinking, None);
        assert_eq!(result.answer.as_deref(), Some("42"));
    }

    #[test]
    fn test_cod_code_after_separator() {
        let raw = "need loop. print each.\n####\n```python\nfor i in range(3):\n    print(i)\n```";
        let result = segment(raw, ReasoningMethod::Cod, 5);
        assert!(result.answer.as_deref().unwrap().starts_with("```python"));
        assert_eq!(result.answer_word_count, 0);
    }

    // ==================== CoT ====================

    #[test]
    fn test_cot_separator() {
        let raw = "First, Jason had 20. He gave some away and has 12 left.\n#### 8";
        let result = segment(raw, ReasoningMethod::Cot, 5);
        assert!(result.thinking.as_deref().unwrap().starts_with("First, Jason"));
        assert_eq!(result.answer.as_deref(), Some("8"));
        assert_eq!(result.draft_steps, 0);
    }

    #[test]
    fn test_cot_final_answer_phrase() {
        let raw = "He started with 20 and ended with 12.\n**Final Answer:** 8";
        let result = segment(raw, ReasoningMethod::Cot, 5);
        assert_eq!(
            result.thinking.as_deref(),
            Some("He started with 20 and ended with 12.\n**")
        );
        assert_eq!(result.answer.as_deref(), Some("8"));
    }

    #[test]
    fn test_cot_the_final_answer_is() {
        let raw = "Reasoning here. The final answer is 8.";
        let result = segment(raw, ReasoningMethod::Cot, 5);
        assert_eq!(result.thinking.as_deref(), Some("Reasoning here. "));
        assert_eq!(result.answer.as_deref(), Some("8."));
    }

    #[test]
    fn test_cot_no_marker_is_all_answer() {
        let result = segment("Just an answer.", ReasoningMethod::Cot, 5);
        assert_eq!(result.thinking, None);
        assert_eq!(result.answer.as_deref(), Some("Just an answer."));
    }

    // ==================== Standard ====================

    #[test]
    fn test_standard_is_all_answer() {
        let result = segment("Thinking #### 42", ReasoningMethod::Standard, 5);
        assert_eq!(result.thinking, None);
        assert_eq!(result.answer.as_deref(), Some("Thinking #### 42"));
    }

    // ==================== Edge cases ====================

    #[test]
    fn test_empty_raw_text() {
        for method in ReasoningMethod::all() {
            let result = segment("", method, 5);
            assert_eq!(result.thinking, None);
            assert_eq!(result.answer, None);
            assert_eq!(result.total_word_count(), 0);

            let blank = segment("  \n ", method, 5);
            assert_eq!(blank.answer, None);
        }
    }

    #[test]
    fn test_separator_with_nothing_after() {
        let result = segment("draft. ####   ", ReasoningMethod::Cod, 5);
        assert_eq!(result.thinking.as_deref(), Some("draft. "));
        assert_eq!(result.answer, None);
        assert!(!result.has_answer());
        assert_eq!(result.display_answer(), "draft. ####   ");
    }

    #[test]
    fn test_word_counts_are_additive() {
        let samples = [
            "Step one. Step two. #### 42",
            "No separator here",
            "x = 3 * 4. y = x + 1. #### y is 13",
            "He had 1/2 of it.\nFinal answer: one half",
            "```\ncode\n``` then words #### done",
            "cost = #### 42",
            "Let total =\n#### 20 - 12",
            "",
        ];
        for raw in samples {
            for method in ReasoningMethod::all() {
                let result = segment(raw, method, 5);
                assert_eq!(
                    result.total_word_count(),
                    joined_count(&result),
                    "counts not additive for {:?} under {}",
                    raw,
                    method
                );
            }
        }
    }

    #[test]
    fn test_equation_across_separator_counts_once() {
        let result = segment("cost = #### 42", ReasoningMethod::Cod, 5);
        assert_eq!(result.thinking_word_count, 1);
        assert_eq!(result.answer_word_count, 0);
        assert_eq!(result.total_word_count(), 1);

        let result = segment("Let total =\n#### 20 - 12", ReasoningMethod::Cod, 5);
        assert_eq!(result.total_word_count(), 2);
        assert_eq!(result.thinking_word_count, 2);
    }
}

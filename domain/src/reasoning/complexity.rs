//! Query complexity classifier.
//!
//! Flags math, logic and multi-step signals in a user query and derives a
//! complexity tier. Advisory only: the tier steers prompt selection and
//! never blocks a request.
//!
//! ## Pattern tables
//!
//! | Signal | Triggers |
//! |--------|----------|
//! | math | digits next to an arithmetic operator, or a math keyword |
//! | logic | `if … then`, or a logical keyword |
//! | multi-step | an ordinal marker, or two or more sentences opening with an action verb |
//!
//! | Tier | Rule |
//! |------|------|
//! | complex | two or more signals, or longer than [`COMPLEX_LENGTH`] chars |
//! | simple | no signal, at most [`SIMPLE_LENGTH`] chars, one clause |
//! | normal | everything else |
//!
//! The heuristics will misclassify some queries. That is accepted.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Queries longer than this are complex regardless of signals.
pub const COMPLEX_LENGTH: usize = 300;

/// Queries must be at most this long to count as simple.
pub const SIMPLE_LENGTH: usize = 80;

static DIGITS_WITH_OPERATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d\s*[-+*/^=×÷<>]|[-+*/^=×÷<>]\s*\d").unwrap()
});

static MATH_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:equations?|solve|calculate|compute|sum|product|integral|integrate|derivative|differentiate|multiply|divide|fraction|percent(?:age)?|average|mean|median|probability|square root|algebra|geometry|area|volume|perimeter|how many|how much|total|remainder|factorial|logarithm|exponent)\b",
    )
    .unwrap()
});

static IF_THEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)\bif\b.*\bthen\b").unwrap());

static LOGIC_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:implies|implication|therefore|all|some|none|every|no one|proof|prove|deduce|infer|contradiction|true or false|either|neither|unless|if and only if|iff|syllogism|valid|logically)\b",
    )
    .unwrap()
});

static ORDINAL_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:first(?:ly)?|second(?:ly)?|third(?:ly)?|then|next|after that|afterwards|finally|lastly|step \d+)\b",
    )
    .unwrap()
});

static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").unwrap());

const ACTION_VERBS: &[&str] = &[
    "calculate", "compute", "find", "determine", "explain", "describe", "list", "write",
    "show", "prove", "solve", "compare", "evaluate", "derive", "estimate", "identify",
    "summarize", "create", "convert", "simplify", "use", "give", "check", "verify",
];

/// Complexity tier of a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    #[default]
    Normal,
    Complex,
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Normal => "normal",
            Complexity::Complex => "complex",
        }
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Signals detected in one user query.
///
/// Derived per turn; not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComplexityProfile {
    pub has_math: bool,
    pub has_logic: bool,
    pub multi_step: bool,
    pub complexity: Complexity,
}

impl ComplexityProfile {
    pub fn is_complex(&self) -> bool {
        self.complexity == Complexity::Complex
    }

    /// Number of raised signals (0–3)
    pub fn signal_count(&self) -> usize {
        [self.has_math, self.has_logic, self.multi_step]
            .iter()
            .filter(|&&b| b)
            .count()
    }
}

/// Classify a user query. An empty query yields the default profile.
pub fn analyze(query: &str) -> ComplexityProfile {
    let query = query.trim();
    if query.is_empty() {
        return ComplexityProfile::default();
    }

    let has_math = DIGITS_WITH_OPERATOR.is_match(query) || MATH_KEYWORD.is_match(query);
    let has_logic = IF_THEN.is_match(query) || LOGIC_KEYWORD.is_match(query);
    let multi_step = ORDINAL_MARKER.is_match(query) || imperative_sentences(query) >= 2;

    let mut profile = ComplexityProfile {
        has_math,
        has_logic,
        multi_step,
        complexity: Complexity::Normal,
    };

    let length = query.chars().count();
    profile.complexity = if profile.signal_count() >= 2 || length > COMPLEX_LENGTH {
        Complexity::Complex
    } else if profile.signal_count() == 0 && length <= SIMPLE_LENGTH && is_single_clause(query) {
        Complexity::Simple
    } else {
        Complexity::Normal
    };

    profile
}

/// Sentences whose first word is an action verb.
fn imperative_sentences(query: &str) -> usize {
    SENTENCE_END
        .split(query)
        .filter_map(|sentence| sentence.split_whitespace().next())
        .filter(|word| {
            let word = word
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            ACTION_VERBS.contains(&word.as_str())
        })
        .count()
}

fn is_single_clause(query: &str) -> bool {
    let sentences = SENTENCE_END
        .split(query)
        .filter(|s| !s.trim().is_empty())
        .count();
    sentences <= 1 && !query.contains([',', ';'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_is_default() {
        assert_eq!(analyze(""), ComplexityProfile::default());
        assert_eq!(analyze("   "), ComplexityProfile::default());
        assert_eq!(analyze("").complexity, Complexity::Normal);
    }

    #[test]
    fn test_logic_and_math_is_complex() {
        let profile = analyze("If x implies y, then solve for x given y=5.");
        assert!(profile.has_math);
        assert!(profile.has_logic);
        assert_eq!(profile.complexity, Complexity::Complex);
    }

    #[test]
    fn test_simple_factual_question() {
        let profile = analyze("What is the capital of France?");
        assert!(!profile.has_math);
        assert!(!profile.has_logic);
        assert!(!profile.multi_step);
        assert_eq!(profile.complexity, Complexity::Simple);
    }

    #[test]
    fn test_arithmetic_detected() {
        assert!(analyze("What is 17 * 23?").has_math);
        assert!(analyze("Calculate the area of a circle").has_math);
        assert!(!analyze("Tell me about cats").has_math);
    }

    #[test]
    fn test_single_math_signal_is_normal() {
        let profile = analyze("What is 17 * 23?");
        assert_eq!(profile.signal_count(), 1);
        assert_eq!(profile.complexity, Complexity::Normal);
    }

    #[test]
    fn test_multi_step_ordinals() {
        assert!(analyze("First boil the water, then add pasta").multi_step);
        assert!(analyze("Finally, summarise it").multi_step);
    }

    #[test]
    fn test_multi_step_imperatives() {
        let profile = analyze("Explain recursion. Write an example. Compare it with loops.");
        assert!(profile.multi_step);
    }

    #[test]
    fn test_single_imperative_is_not_multi_step() {
        assert!(!analyze("Explain recursion.").multi_step);
    }

    #[test]
    fn test_long_query_is_complex() {
        let query = "Tell me a story about a dragon. ".repeat(12);
        let profile = analyze(&query);
        assert_eq!(profile.signal_count(), 0);
        assert_eq!(profile.complexity, Complexity::Complex);
    }

    #[test]
    fn test_comma_prevents_simple() {
        let profile = analyze("Who wrote Hamlet, and when?");
        assert_eq!(profile.complexity, Complexity::Normal);
    }

    #[test]
    fn test_word_boundaries() {
        // "sum" inside "summer", "all" inside "ball"
        let profile = analyze("Summer ball");
        assert!(!profile.has_math);
        assert!(!profile.has_logic);
    }
}

//! Answer normalization and notation-aware word counting.
//!
//! [`normalize`] turns a free-text answer into a voting key so that
//! "Therefore, the answer is $8." and "8" land in the same bucket.
//! The key is never shown to the user.
//!
//! [`count_words`] keeps word-count comparisons fair between prose-heavy
//! CoT output and notation-heavy CoD output: code blocks are ignored, and an
//! equation or a fraction counts as a single word.

use regex::Regex;
use std::sync::LazyLock;

/// Leading filler phrases, longest first. Anchored to the start of the answer.
static LEADING_FILLER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:the final answer is|the answer is|the result is|the value is|the solution is|we find that|we get|therefore|thus|hence|so)(?:[\s,:;]+|$)",
    )
    .unwrap()
});

/// `1,000` → `1000`
static THOUSANDS_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d),(\d{3})\b").unwrap());

static UNIT_SYMBOLS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[$€£¥₹%°]").unwrap());

const UNIT_WORDS: &str = r"km/h|kmh|mph|kph|km|cm|mm|kg|mg|lbs|lb|oz|ml|liters?|litres?|meters?|metres?|kilometers?|feet|foot|ft|inches|inch|miles?|seconds?|secs?|minutes?|mins?|hours?|hrs?|degrees?|dollars?|cents?|euros?|pounds|percent|units?";

/// Single-letter units. Only stripped after a number, so `Option H` keeps its letter.
const LETTER_UNITS: &str = r"m|g|l|s|h";

/// Unit after a number: `5km`, `30s`, `12 m`
static UNIT_AFTER_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(\d)\s*(?:{UNIT_WORDS}|{LETTER_UNITS})\b")).unwrap()
});

/// Stand-alone unit word
static UNIT_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"\b(?:{UNIT_WORDS})\b")).unwrap());

static CODE_BLOCK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.*?```").unwrap());

/// `x = 3 * (4 + 1)` and similar simple assignments
static SIMPLE_EQUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z_]\w*\s*=\s*[\d+\-*/^().\s]*\d[\d+\-*/^().]*").unwrap()
});

static FRACTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d+/\d+\b").unwrap());

static OPERATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[+\-*/=<>^×÷≤≥≠]+").unwrap());

/// Upper bound on normalization passes; every pass only removes or replaces
/// characters, so real inputs settle after two or three.
const MAX_NORMALIZE_PASSES: usize = 8;

/// Canonicalize an answer for equality comparison during voting.
///
/// Idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(answer: &str) -> String {
    let mut current = normalize_once(answer);
    for _ in 0..MAX_NORMALIZE_PASSES {
        let next = normalize_once(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn normalize_once(answer: &str) -> String {
    let mut text = answer.trim().to_string();
    while THOUSANDS_SEPARATOR.is_match(&text) {
        text = THOUSANDS_SEPARATOR
            .replace_all(&text, "${1}${2}")
            .into_owned();
    }

    while let Some(m) = LEADING_FILLER.find(&text) {
        if m.is_empty() {
            break;
        }
        text = text[m.end()..].to_string();
    }

    let text = text.to_lowercase();
    // Removed without a gap so `-$5` keeps its sign.
    let text = UNIT_SYMBOLS.replace_all(&text, "");
    let text = UNIT_AFTER_NUMBER.replace_all(&text, "${1}");
    let text = UNIT_WORD.replace_all(&text, " ");

    collapse_punctuation(&text)
}

/// Replace punctuation with spaces and squash whitespace runs.
///
/// A decimal point or slash between digits and a minus sign that starts a
/// number are part of the value and are kept.
fn collapse_punctuation(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());

    for (i, &c) in chars.iter().enumerate() {
        let prev = i.checked_sub(1).map(|j| chars[j]);
        let next = chars.get(i + 1).copied();
        let digit_after = next.is_some_and(|n| n.is_ascii_digit());

        let keep = c.is_alphanumeric()
            || ((c == '.' || c == '/') && prev.is_some_and(|p| p.is_ascii_digit()) && digit_after)
            || (c == '-' && digit_after && prev.is_none_or(char::is_whitespace));

        out.push(if keep { c } else { ' ' });
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Count words the way the CoD/CoT comparison expects.
///
/// 1. fenced code blocks are dropped
/// 2. `identifier = expression` counts as one word
/// 3. `digits/digits` counts as one word
/// 4. remaining operator runs separate words
pub fn count_words(text: &str) -> usize {
    if text.trim().is_empty() {
        return 0;
    }

    let text = CODE_BLOCK.replace_all(text, " ");
    let text = SIMPLE_EQUATION.replace_all(&text, " EQ ");
    let text = FRACTION.replace_all(&text, " FRAC ");
    let text = OPERATOR_RUN.replace_all(&text, " ");

    text.split_whitespace().count()
}

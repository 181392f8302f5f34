//! Response processing for reasoning-style completions.
//!
//! These are total functions over arbitrary strings: nothing here fails on
//! malformed model output. Missing separators fall back to "whole text is the
//! answer", unparseable answers simply normalize to an empty key.
//!
//! | Function | Purpose |
//! |----------|---------|
//! | [`segment`] | Split a raw completion into thinking and answer |
//! | [`normalize`] | Canonical voting key for an answer |
//! | [`count_words`] | Notation-aware word count |
//! | [`analyze`] | Complexity profile of a user query |

pub mod complexity;
pub mod method;
pub mod normalize;
pub mod segment;

pub use complexity::{Complexity, ComplexityProfile, analyze};
pub use method::{ReasoningMethod, SEPARATOR};
pub use normalize::{count_words, normalize};
pub use segment::{CompletionResult, segment};

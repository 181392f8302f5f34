//! Prompt templates for CoT / CoD reasoning

use crate::config::Enhancement;
use crate::reasoning::{ComplexityProfile, ReasoningMethod, SEPARATOR};
use crate::session::entities::{Message, Prompt, Role};

/// Per-step word budget used by the enhanced CoD prompt, whatever the
/// configured limit is.
pub const DEFAULT_ENHANCED_WORD_LIMIT: usize = 5;

/// Templates for the system instruction of each reasoning method
pub struct PromptTemplate;

impl PromptTemplate {
    /// Standard Chain-of-Thought instruction
    pub fn cot() -> String {
        format!(
            "Think step by step to answer the following question. \
Return the answer at the end of the response after a separator {SEPARATOR}."
        )
    }

    /// Chain-of-Thought instruction for complex problems
    pub fn cot_enhanced() -> String {
        format!(
            "Think step by step to answer the following question. \
This problem may need many steps: use as many reasoning steps as you need \
and do not compress or skip any of them. Check each intermediate result before moving on. \
Return the answer at the end of the response after a separator {SEPARATOR}."
        )
    }

    /// Chain-of-Draft instruction with the given per-step word budget
    pub fn cod(word_limit: usize) -> String {
        format!(
            "Think step by step, but only keep a minimum draft for each thinking step, \
with {word_limit} words at most. \
Return the answer at the end of the response after a separator {SEPARATOR}.\n\n{}",
            Self::code_block_exception()
        )
    }

    /// Chain-of-Draft instruction for complex problems: fixed per-step budget,
    /// unbounded number of steps
    pub fn cod_enhanced() -> String {
        format!(
            "Think step by step, but only keep a minimum draft for each thinking step, \
with {DEFAULT_ENHANCED_WORD_LIMIT} words at most per step. \
This problem is complex: use as many draft steps as you need, \
there is no limit on the number of steps, only on the words in each step. \
Return the answer at the end of the response after a separator {SEPARATOR}.\n\n{}",
            Self::code_block_exception()
        )
    }

    /// Exception carried by every CoD instruction
    pub fn code_block_exception() -> String {
        format!(
            "Exception for code: when the answer is source code, the per-step word limit \
does not apply to the code. Put the code after the separator {SEPARATOR}, \
inside a fenced code block (```)."
        )
    }
}

/// Pick the system prompt for one turn.
///
/// Returns an empty string for [`ReasoningMethod::Standard`]. The enhanced
/// variants are used only when enhancement is enabled, set to adaptive, and
/// the query profiled as complex.
pub fn select_prompt(
    method: ReasoningMethod,
    enhanced_enabled: bool,
    enhancement: Enhancement,
    profile: &ComplexityProfile,
    word_limit: usize,
) -> String {
    let use_enhanced =
        enhanced_enabled && enhancement == Enhancement::Adaptive && profile.is_complex();

    match (method, use_enhanced) {
        (ReasoningMethod::Standard, _) => String::new(),
        (ReasoningMethod::Cot, false) => PromptTemplate::cot(),
        (ReasoningMethod::Cot, true) => PromptTemplate::cot_enhanced(),
        (ReasoningMethod::Cod, false) => PromptTemplate::cod(word_limit),
        (ReasoningMethod::Cod, true) => PromptTemplate::cod_enhanced(),
    }
}

/// Install `system_prompt` as the prompt's system message.
///
/// If the first message is already a system message its content is replaced,
/// otherwise a system message is inserted at the front. An empty prompt text
/// leaves the messages untouched.
pub fn apply_system_prompt(prompt: &mut Prompt, system_prompt: &str) {
    if system_prompt.is_empty() {
        return;
    }

    match prompt.messages.first_mut() {
        Some(first) if first.role == Role::System => {
            first.content = system_prompt.to_string();
        }
        _ => prompt.messages.insert(0, Message::system(system_prompt)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reasoning::Complexity;

    fn profile(complexity: Complexity) -> ComplexityProfile {
        ComplexityProfile {
            complexity,
            ..Default::default()
        }
    }

    #[test]
    fn test_standard_is_empty() {
        let prompt = select_prompt(
            ReasoningMethod::Standard,
            true,
            Enhancement::Adaptive,
            &profile(Complexity::Complex),
            5,
        );
        assert!(prompt.is_empty());
    }

    #[test]
    fn test_cot_standard_and_enhanced() {
        let plain = select_prompt(
            ReasoningMethod::Cot,
            false,
            Enhancement::Adaptive,
            &profile(Complexity::Complex),
            5,
        );
        assert_eq!(plain, PromptTemplate::cot());

        let enhanced = select_prompt(
            ReasoningMethod::Cot,
            true,
            Enhancement::Adaptive,
            &profile(Complexity::Complex),
            5,
        );
        assert_eq!(enhanced, PromptTemplate::cot_enhanced());
        assert!(enhanced.contains("as many reasoning steps"));
    }

    #[test]
    fn test_cod_substitutes_word_limit() {
        let prompt = select_prompt(
            ReasoningMethod::Cod,
            false,
            Enhancement::Adaptive,
            &profile(Complexity::Normal),
            7,
        );
        assert!(prompt.contains("with 7 words at most"));
        assert!(prompt.contains(SEPARATOR));
    }

    #[test]
    fn test_cod_enhanced_fixes_budget() {
        let prompt = select_prompt(
            ReasoningMethod::Cod,
            true,
            Enhancement::Adaptive,
            &profile(Complexity::Complex),
            12,
        );
        assert_eq!(prompt, PromptTemplate::cod_enhanced());
        assert!(prompt.contains("with 5 words at most per step"));
        assert!(!prompt.contains("12 words"));
    }

    #[test]
    fn test_enhanced_requires_adaptive_and_complex() {
        let standard_mode = select_prompt(
            ReasoningMethod::Cod,
            true,
            Enhancement::Standard,
            &profile(Complexity::Complex),
            5,
        );
        assert_eq!(standard_mode, PromptTemplate::cod(5));

        let not_complex = select_prompt(
            ReasoningMethod::Cod,
            true,
            Enhancement::Adaptive,
            &profile(Complexity::Normal),
            5,
        );
        assert_eq!(not_complex, PromptTemplate::cod(5));
    }

    #[test]
    fn test_cod_always_has_code_exception() {
        for text in [PromptTemplate::cod(3), PromptTemplate::cod_enhanced()] {
            assert!(text.contains("fenced code block"));
            assert!(text.contains("does not apply to the code"));
        }
    }

    #[test]
    fn test_apply_system_prompt_replaces_existing() {
        let mut prompt = Prompt::new(vec![Message::system("old"), Message::user("q")]);
        apply_system_prompt(&mut prompt, "new");
        assert_eq!(prompt.messages.len(), 2);
        assert_eq!(prompt.system(), Some("new"));
    }

    #[test]
    fn test_apply_system_prompt_inserts_first() {
        let mut prompt = Prompt::new(vec![Message::user("q")]);
        apply_system_prompt(&mut prompt, "sys");
        assert_eq!(prompt.messages[0].role, Role::System);
        assert_eq!(prompt.messages[1].content, "q");
    }

    #[test]
    fn test_apply_empty_system_prompt_is_noop() {
        let mut prompt = Prompt::new(vec![Message::user("q")]);
        apply_system_prompt(&mut prompt, "");
        assert_eq!(prompt.messages.len(), 1);
        assert_eq!(prompt.system(), None);
    }
}

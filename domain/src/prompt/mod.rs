//! Prompt domain
//!
//! System-prompt templates for each reasoning method and the adaptive
//! selection between the standard and enhanced variants.

mod template;

pub use template::{
    DEFAULT_ENHANCED_WORD_LIMIT, PromptTemplate, apply_system_prompt, select_prompt,
};

//! Conversation domain
//!
//! Messages of a chat thread and the prompt sent for one completion.

pub mod entities;

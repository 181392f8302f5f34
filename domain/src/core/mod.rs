//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] — model identifiers understood by the completion proxy
//! - [`question::Question`] — a validated user query
//! - [`error::DomainError`] — domain-level errors

pub mod error;
pub mod model;
pub mod question;

//! Completion proxy adapter
//!
//! [`ProxyLlmGateway`] implements the
//! [`LlmGateway`](cod_application::LlmGateway) port over HTTP using `reqwest`.

mod gateway;
mod wire;

pub use gateway::{ProxyLlmGateway, ProxySettings};
pub use wire::{ProxyRequest, WireMessage, build_request_body, parse_completion_body};

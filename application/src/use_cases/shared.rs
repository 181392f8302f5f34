//! Shared helpers for use cases.
//!
//! Per-call timeout and cancellation wrappers around the gateway.

use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Whether cancellation has been requested.
pub(crate) fn is_cancelled(token: &Option<CancellationToken>) -> bool {
    token.as_ref().is_some_and(|t| t.is_cancelled())
}

/// Run `future` unless the token fires first. `None` means cancelled.
pub(crate) async fn cancellable<F: Future>(
    token: &Option<CancellationToken>,
    future: F,
) -> Option<F::Output> {
    match token {
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => None,
            output = future => Some(output),
        },
        None => Some(future.await),
    }
}

/// One gateway call bounded by an optional timeout.
///
/// Expiry drops the in-flight call and surfaces as [`GatewayError::Timeout`].
pub(crate) async fn generate_with_timeout(
    gateway: &dyn LlmGateway,
    request: &CompletionRequest,
    timeout: Option<Duration>,
) -> Result<String, GatewayError> {
    match timeout {
        Some(timeout) => tokio::time::timeout(timeout, gateway.generate(request))
            .await
            .unwrap_or_else(|_| Err(GatewayError::Timeout)),
        None => gateway.generate(request).await,
    }
}

//! Execution parameters for the generation loop.
//!
//! These are application-layer concerns, not domain policy: the domain never
//! waits on anything.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default per-call completion timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Generation loop control parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Timeout for each individual completion call. `None` waits forever.
    ///
    /// Expiry cancels only the call in flight; a voting round carries on
    /// with the next path.
    pub request_timeout: Option<Duration>,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
        }
    }
}

impl ExecutionParams {
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }
}

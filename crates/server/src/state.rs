use std::sync::Arc;
use std::time::Duration;

use configs::{ErrorMapping, ServerConfig};
use service::{CarRepository, Context};

/// Shared handler state: the storage contract plus per-request policy.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn CarRepository>,
    pub request_timeout: Duration,
    pub http_timeout: Duration,
    pub error_mapping: ErrorMapping,
}

impl AppState {
    pub fn new(repo: Arc<dyn CarRepository>, server: &ServerConfig) -> Self {
        Self {
            repo,
            request_timeout: server.request_timeout(),
            http_timeout: server.http_timeout(),
            error_mapping: server.error_mapping,
        }
    }

    /// Fresh deadline-bound context for one request.
    pub fn context(&self) -> Context {
        Context::with_timeout(self.request_timeout)
    }
}

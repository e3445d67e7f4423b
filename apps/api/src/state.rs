use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;

use crate::agent::AgentClient;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// The only mutable state crossing requests is the admission semaphore;
/// everything else is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable upstream transport. Default: `AnthropicAgentClient`.
    pub agent: Arc<dyn AgentClient>,
    /// Bounded request admission. Full semaphore means immediate rejection
    /// with a retry hint, never queuing.
    pub admission: Arc<Semaphore>,
    /// Process start, for `/health` uptime reporting.
    pub started_at: Instant,
}

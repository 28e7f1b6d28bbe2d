use std::sync::Arc;

use crate::catalog::store::CourseStore;
use crate::generation::audit::GenerationLog;
use crate::llm_client::ChatGateway;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: CourseStore,
    /// Pluggable completion gateway. Production wires OpenRouterClient;
    /// tests substitute stubs.
    pub gateway: Arc<dyn ChatGateway>,
    pub audit: GenerationLog,
}

//! Shared application state.

use std::sync::Arc;

use washflow_appointments::application::engine::WashflowEngine;

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The appointment lifecycle engine.
    pub engine: Arc<WashflowEngine>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(engine: WashflowEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

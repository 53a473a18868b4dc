//! Application State

use std::sync::Arc;

use tokenmate_core::ChatAgent;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Chat pipeline (provider plus optional market context)
    pub agent: Arc<ChatAgent>,
}

use std::sync::Arc;

use crate::assistant::DesignAssistant;
use crate::store::DesignStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `PgStore` when `DATABASE_URL` is set, `MemoryStore` otherwise.
    pub store: Arc<dyn DesignStore>,
    pub assistant: DesignAssistant,
}

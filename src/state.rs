use std::sync::Arc;

use crate::registry::NameRegistry;
use crate::ws::ConnectionRegistry;

/// Shared application state passed to all handlers via axum State extractor.
#[derive(Clone)]
pub struct AppState {
    /// Display-name registry (claim/release, mutex-guarded)
    pub names: Arc<NameRegistry>,
    /// Active WebSocket connections by connection id
    pub connections: ConnectionRegistry,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            names: Arc::new(NameRegistry::new()),
            connections: crate::ws::new_connection_registry(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

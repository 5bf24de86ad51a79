/**
 * Application State
 *
 * Shared state handed to every axum handler: the document store behind a
 * trait object and the realtime relay hub. Both are cheap to clone; handlers
 * extract the sub-state they need via `FromRef`.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use super::super::relay::RelayHub;
use super::super::store::DocumentStore;

/// Shared application state for all routes
#[derive(Clone)]
pub struct AppState {
    /// Share-link persistence
    pub store: Arc<dyn DocumentStore>,
    /// Per-room broadcast channels for the realtime relay
    pub hub: RelayHub,
}

impl AppState {
    /// Create application state from its components
    pub fn new(store: Arc<dyn DocumentStore>, hub: RelayHub) -> Self {
        Self { store, hub }
    }
}

impl FromRef<AppState> for Arc<dyn DocumentStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for RelayHub {
    fn from_ref(state: &AppState) -> Self {
        state.hub.clone()
    }
}

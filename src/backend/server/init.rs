/**
 * Server Initialization
 *
 * Builds the Axum application: loads configuration, connects the document
 * store, creates the relay hub, wires the router, and starts the periodic
 * room cleanup task.
 *
 * # Initialization Process
 *
 * 1. Load configuration from the environment
 * 2. Connect the document store (PostgreSQL, or in-memory fallback)
 * 3. Create the relay hub with the configured room capacity
 * 4. Create the router with all routes
 * 5. Spawn the periodic cleanup task for empty relay rooms
 *
 * # Error Handling
 *
 * Initialization is resilient: a missing or unreachable database does not
 * prevent startup, it only downgrades persistence to the in-memory store.
 */

use axum::Router;

use crate::backend::relay::RelayHub;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_store, ServerConfig};
use crate::backend::server::state::AppState;

/// Interval between sweeps of empty relay rooms
const ROOM_CLEANUP_INTERVAL_SECS: u64 = 300; // 5 minutes

/// Create and configure the Axum application
///
/// # Returns
///
/// Configured Axum Router ready to serve requests. The caller binds the
/// listener and drives the server.
pub async fn create_app(config: &ServerConfig) -> Router<()> {
    tracing::info!("[Init] Initializing share-link backend server");

    // Step 1: Connect the document store
    let store = load_store(config).await;

    // Step 2: Create the relay hub
    let hub = RelayHub::with_capacity(config.relay_capacity);
    tracing::info!(
        "[Init] Relay hub initialized (room capacity {})",
        config.relay_capacity
    );

    // Step 3: Create app state and router
    let app_state = AppState::new(store, hub);
    let app = create_router(app_state.clone());

    // Step 4: Start periodic cleanup of rooms with no subscribers
    let cleanup_hub = app_state.hub.clone();
    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(std::time::Duration::from_secs(ROOM_CLEANUP_INTERVAL_SECS));
        loop {
            interval.tick().await;
            let removed = cleanup_hub.cleanup_idle_rooms();
            if removed > 0 {
                tracing::debug!("[Init] Cleaned up {} idle relay rooms", removed);
            }
        }
    });

    tracing::info!("[Init] Router configured with periodic cleanup task");

    app
}

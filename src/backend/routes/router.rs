/**
 * Router Configuration
 *
 * Combines all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * Routes are added in a specific order to ensure proper matching:
 * 1. Realtime relay (WebSocket upgrade)
 * 2. API routes (share links, upload)
 * 3. Static files
 * 4. Fallback handler (404)
 */

use axum::Router;
use tower_http::services::ServeDir;

use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state containing the document store and relay hub
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
///
/// # Route Details
///
/// ## Realtime
///
/// - `GET /relay` - WebSocket upgrade for the room-scoped content relay
///
/// ## API Routes
///
/// - `POST /api/share` - Create a share link
/// - `GET /api/share/{slug}` - Fetch a link
/// - `POST /api/share/{slug}` - Unlock a private link
/// - `PUT /api/share/{slug}` - Update a link
/// - `POST /api/upload` - Create a link from an uploaded JSON file
///
/// ## Static Files
///
/// Static files are served from the public directory under `/static`.
///
/// ## Fallback
///
/// The fallback handler returns 404 for unknown routes.
pub fn create_router(app_state: AppState) -> Router<()> {
    // Realtime relay route
    let router = Router::new().route(
        "/relay",
        axum::routing::get({
            use crate::backend::relay::ws::handle_relay_upgrade;
            handle_relay_upgrade
        }),
    );

    // Add API routes
    let router = configure_api_routes(router);

    // Add static file serving
    let router = router.nest_service("/static", ServeDir::new("public"));

    // Fallback handler for 404
    let router = router.fallback(|| async { "404 Not Found" });

    // Use AppState as router state
    router.with_state(app_state)
}

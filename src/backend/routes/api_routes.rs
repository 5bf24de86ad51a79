/**
 * API Route Handlers
 *
 * Adds the share-link REST endpoints to the router:
 *
 * ## Share Links
 * - `POST /api/share` - Create a share link
 * - `GET /api/share/{slug}` - Fetch a link (content withheld while locked)
 * - `POST /api/share/{slug}` - Unlock a private link with its password
 * - `PUT /api/share/{slug}` - Update a link's content and sharing settings
 *
 * ## Upload
 * - `POST /api/upload` - Create a public link from an uploaded JSON file
 */

use axum::Router;

use crate::backend::links::handlers::{
    handle_create_share, handle_get_share, handle_unlock_share, handle_update_share,
    handle_upload,
};
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// # Arguments
///
/// * `router` - The router to add routes to
///
/// # Returns
///
/// Router with API routes configured. All routes are public; access control
/// for private links happens inside the handlers via password verification.
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Share-link lifecycle endpoints
        .route("/api/share", axum::routing::post(handle_create_share))
        .route(
            "/api/share/{slug}",
            axum::routing::get(handle_get_share)
                .post(handle_unlock_share)
                .put(handle_update_share),
        )
        // File upload endpoint
        .route("/api/upload", axum::routing::post(handle_upload))
}

//! HTTP route configuration
//!
//! Router assembly for the share-link API and the realtime relay endpoint.

pub mod api_routes;
pub mod router;

pub use router::create_router;

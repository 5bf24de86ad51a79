//! Backend modules
//!
//! Share-link persistence, lifecycle operations, and the realtime relay.
//! Store trait, slug/password helpers, and the relay hub compile everywhere;
//! the HTTP surface (error conversion, routes, server setup) is gated behind
//! the `server` feature.

pub mod links;
pub mod relay;
pub mod store;

#[cfg(feature = "server")]
pub mod error;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod server;

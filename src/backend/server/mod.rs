//! Server setup
//!
//! Configuration loading, shared application state, and Axum app
//! initialization.

pub mod config;
pub mod init;
pub mod state;

pub use config::{load_store, ServerConfig};
pub use init::create_app;
pub use state::AppState;

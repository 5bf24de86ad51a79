//! JsonShare - Main Library
//!
//! JsonShare is a document share-link service with real-time content
//! synchronization. Documents are published under short random slugs,
//! optionally protected by a password, and live edits are relayed between
//! viewers of the same link over WebSockets.
//!
//! # Module Structure
//!
//! The library is organized into three main modules:
//!
//! - **`shared`** - Types shared between client and backend
//!   - Share-link records, wire event frames
//!   - The pure access evaluator
//!   - Error types and HTTP DTOs
//!
//! - **`backend`** - Server-side code
//!   - Document store trait with in-memory and PostgreSQL implementations
//!   - Slug generation and password hashing
//!   - Share-link lifecycle operations
//!   - Room-scoped realtime relay over broadcast channels
//!   - Axum HTTP server (behind the `server` feature)
//!
//! - **`client`** - Client-side session machinery
//!   - Editor session state with change debouncing and echo suppression
//!   - Local ownership tracking
//!   - HTTP API wrapper
//!
//! # Feature Flags
//!
//! - **`server`** - Enables the Axum HTTP surface, WebSocket relay endpoint,
//!   and PostgreSQL store. The store trait, lifecycle operations, relay hub,
//!   and client all compile without it.
//!
//! # Usage
//!
//! ## Server-Side
//!
//! ```rust,ignore
//! use jsonshare::backend::server::{create_app, ServerConfig};
//!
//! let config = ServerConfig::from_env();
//! let app = create_app(&config).await;
//! // Use app with an Axum server
//! ```
//!
//! # Thread Safety
//!
//! All backend state is thread-safe: the store sits behind `Arc<dyn
//! DocumentStore>` and relay rooms are `broadcast::Sender` channels behind a
//! mutex-guarded map.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;

/// Client-side session machinery
pub mod client;

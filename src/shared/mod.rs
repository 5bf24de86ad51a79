//! Shared Module
//!
//! Types and pure logic shared between the server and client sides of the
//! share-link system. Everything here is platform-agnostic and designed for
//! serialization over HTTP and the relay WebSocket.

/// The persisted share-link record and its enums
pub mod record;

/// Relay wire protocol frames
pub mod event;

/// Error taxonomy
pub mod error;

/// Pure access control evaluator
pub mod access;

/// HTTP surface request/response types
pub mod api;

/// Re-export commonly used types for convenience
pub use access::{evaluate, evaluate_parts, AccessDecision};
pub use error::{ShareError, MIN_PASSWORD_LEN};
pub use event::{ClientFrame, ServerFrame};
pub use record::{JsonShareMode, ShareAccessType, ShareLinkRecord};

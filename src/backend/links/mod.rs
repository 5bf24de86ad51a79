//! Share-Link Module
//!
//! Everything that manages share-link records: slug generation, the
//! password digest, the service operations (the sole writers of record
//! state), and the HTTP handlers in front of them.

/// Slug generation with bounded-retry uniqueness
pub mod slug;

/// Password digest and constant-time verification
pub mod password;

/// Create/Get/Update/VerifyPassword operations
pub mod service;

/// HTTP handlers
#[cfg(feature = "server")]
pub mod handlers;

pub use service::{
    create_share_link, get_share_link, update_share_link, verify_share_link_password,
    ShareLinkInput,
};

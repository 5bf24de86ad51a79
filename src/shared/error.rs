//! Shared Error Types
//!
//! The error taxonomy for the share-link lifecycle and relay. These errors
//! are produced on both sides of the wire: the backend surfaces them as HTTP
//! failures, the client maps HTTP failures back onto them.
//!
//! # Propagation policy
//!
//! `InvalidPassword` and `WeakPassword` are recoverable locally; the user
//! retries. `StoreUnavailable` and `SlugExhausted` are surfaced as operation
//! failures and never retried automatically by this crate. `RelayUnavailable`
//! degrades a session to local-only editing. No error from this crate may
//! cost a client its in-memory authoritative content.

use thiserror::Error;

/// Minimum password length accepted for private links
pub const MIN_PASSWORD_LEN: usize = 4;

/// Errors of the share-link lifecycle and synchronization relay
#[derive(Debug, Error, Clone)]
pub enum ShareError {
    /// The slug has no record behind it
    #[error("share link '{slug}' does not exist")]
    NotFound {
        /// The slug that was looked up
        slug: String,
    },

    /// Password verification failed; the session remains locked
    #[error("invalid password")]
    InvalidPassword,

    /// A private link was created or updated without an acceptable password
    #[error("private links require a password of at least {min_len} characters")]
    WeakPassword {
        /// Minimum accepted length
        min_len: usize,
    },

    /// The generator could not find a unique slug within the retry budget
    #[error("could not generate a unique slug after {attempts} attempts")]
    SlugExhausted {
        /// Number of consecutive collisions observed
        attempts: u32,
    },

    /// The underlying document store is unreachable or errored
    #[error("document store unavailable: {message}")]
    StoreUnavailable {
        /// Human-readable cause
        message: String,
    },

    /// The relay transport is down; collaboration is suspended
    #[error("relay unavailable: {message}")]
    RelayUnavailable {
        /// Human-readable cause
        message: String,
    },

    /// JSON serialization or deserialization failed
    #[error("serialization error: {message}")]
    Serialization {
        /// Human-readable cause
        message: String,
    },
}

impl ShareError {
    /// Create a `NotFound` error for a slug
    pub fn not_found(slug: impl Into<String>) -> Self {
        Self::NotFound { slug: slug.into() }
    }

    /// Create a `WeakPassword` error with the crate-wide minimum length
    pub fn weak_password() -> Self {
        Self::WeakPassword {
            min_len: MIN_PASSWORD_LEN,
        }
    }

    /// Create a `StoreUnavailable` error
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
        }
    }

}

impl From<serde_json::Error> for ShareError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

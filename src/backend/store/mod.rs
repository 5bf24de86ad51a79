//! Document Store Adapter
//!
//! The share-link service treats persistence as an opaque key(slug) ->
//! value(record) store with find/insert/update. The adapter trait lets the
//! server run against PostgreSQL in production and an in-memory map in
//! tests or when no database is configured.
//!
//! # Consistency
//!
//! Implementations must be strong enough that a read immediately following
//! a local write on the same process observes that write. Nothing beyond
//! "the store persists what was last successfully written" is promised.
//!
//! # Failure modes
//!
//! Every operation is fallible with [`StoreError`]. An unreachable or timed
//! out backend surfaces as `Unavailable`; the caller decides whether to
//! retry (this crate never retries automatically).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::shared::record::{JsonShareMode, ShareAccessType, ShareLinkRecord};
use crate::shared::ShareError;

mod memory;
#[cfg(feature = "server")]
mod pg;

pub use memory::MemoryStore;
#[cfg(feature = "server")]
pub use pg::PgStore;

/// Failure modes of the document store
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend is unreachable, timed out, or errored
    #[error("store unavailable: {message}")]
    Unavailable {
        /// Human-readable cause
        message: String,
    },

    /// An insert collided with an existing slug
    #[error("duplicate slug: {slug}")]
    DuplicateSlug {
        /// The colliding slug
        slug: String,
    },
}

impl StoreError {
    /// Create an `Unavailable` error
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

impl From<StoreError> for ShareError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable { message } => ShareError::StoreUnavailable { message },
            // A duplicate escaping the service's retry loop still means the
            // create failed at the persistence boundary.
            StoreError::DuplicateSlug { slug } => ShareError::StoreUnavailable {
                message: format!("persistent slug collision on '{}'", slug),
            },
        }
    }
}

/// What an update does to the stored password hash
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordAction {
    /// Store this digest (privacy established or password changed)
    Set(String),
    /// Remove any stored digest (link switched to public)
    Clear,
    /// Leave the stored digest untouched (private save without re-entering
    /// the password)
    Keep,
}

/// Full replacement of the service-owned fields of a record
///
/// Updates write the whole field set in one atomic replace keyed by slug,
/// so concurrent saves are last-write-wins with no partial-field races.
#[derive(Debug, Clone)]
pub struct RecordPatch {
    /// Replacement content
    pub content: String,
    /// Replacement view mode
    pub mode: JsonShareMode,
    /// Replacement privacy flag
    pub is_private: bool,
    /// Replacement access level (always concrete)
    pub access_type: ShareAccessType,
    /// Password hash disposition
    pub password_action: PasswordAction,
    /// New `updated_at` timestamp
    pub updated_at: DateTime<Utc>,
}

/// Opaque slug-keyed record store
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Look up a record by slug
    async fn find_one(&self, slug: &str) -> Result<Option<ShareLinkRecord>, StoreError>;

    /// Insert a new record; fails with `DuplicateSlug` on collision
    async fn insert_one(&self, record: &ShareLinkRecord) -> Result<(), StoreError>;

    /// Apply a full-field patch; returns false when no record matched
    async fn update_one(&self, slug: &str, patch: RecordPatch) -> Result<bool, StoreError>;

    /// Existence probe used by the slug generator
    async fn exists(&self, slug: &str) -> Result<bool, StoreError> {
        Ok(self.find_one(slug).await?.is_some())
    }
}

/**
 * Share Link Record
 *
 * This module defines the persisted unit of the share-link system: a named
 * JSON document identified by a short slug, together with its sharing
 * settings (privacy, access level, password digest).
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Last-used view mode for a shared document
///
/// Persisted cosmetic state only; it never affects access control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonShareMode {
    /// Graph visualization view
    Visualize,
    /// Collapsible tree view
    Tree,
    /// Plain formatter view
    Formatter,
}

impl Default for JsonShareMode {
    fn default() -> Self {
        Self::Visualize
    }
}

impl JsonShareMode {
    /// Stable string form used for persistence
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visualize => "visualize",
            Self::Tree => "tree",
            Self::Formatter => "formatter",
        }
    }

    /// Parse the persisted string form; unknown values fall back to the default
    pub fn parse(value: &str) -> Self {
        match value {
            "tree" => Self::Tree,
            "formatter" => Self::Formatter,
            _ => Self::Visualize,
        }
    }
}

/// Whether a non-owner reader of a link may mutate the document
///
/// Old records may lack this field entirely, so reads default to `Viewer`.
/// Writers of this crate always persist a concrete value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareAccessType {
    /// Non-owners may edit
    Editor,
    /// Non-owners are read-only
    Viewer,
}

impl Default for ShareAccessType {
    fn default() -> Self {
        Self::Viewer
    }
}

impl ShareAccessType {
    /// Stable string form used for persistence
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Editor => "editor",
            Self::Viewer => "viewer",
        }
    }

    /// Parse the persisted string form; unknown values fall back to `Viewer`
    pub fn parse(value: &str) -> Self {
        match value {
            "editor" => Self::Editor,
            _ => Self::Viewer,
        }
    }
}

/// The persisted share-link record
///
/// # Invariants
///
/// - `slug` is globally unique and immutable after creation; it doubles as
///   the relay room key and the store primary key.
/// - `password_hash` is present only while `is_private` is true; switching a
///   link back to public clears it.
/// - `access_type` is always concrete after any write by this crate, even
///   though deserialization tolerates its absence in old records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareLinkRecord {
    /// Short unique public identifier
    pub slug: String,
    /// Raw JSON text; no schema validation is applied here
    pub content: String,
    /// Last-used view mode
    pub mode: JsonShareMode,
    /// Whether a password is required to read the content
    pub is_private: bool,
    /// Access level for non-owner readers
    #[serde(default)]
    pub access_type: ShareAccessType,
    /// Hex SHA-256 digest of the link password, if one is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Refreshed on every successful update
    pub updated_at: DateTime<Utc>,
}

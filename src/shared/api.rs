/**
 * Share-Link HTTP Surface Types
 *
 * Request and response bodies for the share-link API, used by the backend
 * handlers and the client API wrapper alike so the two sides cannot drift.
 *
 * Endpoints:
 * - `POST /api/share`          create -> `{slug, accessType}`
 * - `GET  /api/share/{slug}`   fetch (content withheld while locked)
 * - `POST /api/share/{slug}`   unlock with `{password}`
 * - `PUT  /api/share/{slug}`   update
 * - `POST /api/upload`         multipart JSON file upload -> `{slug}`
 */

use serde::{Deserialize, Serialize};

use crate::shared::record::{JsonShareMode, ShareAccessType, ShareLinkRecord};

/// Body of `POST /api/share`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShareRequest {
    /// Raw JSON text to share
    pub content: String,
    /// Initial view mode
    pub mode: JsonShareMode,
    /// Whether the link requires a password to read
    #[serde(default)]
    pub is_private: bool,
    /// Access level for non-owners; omitted means viewer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_type: Option<ShareAccessType>,
    /// Link password; required when `is_private` is true
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Response of `POST /api/share`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShareResponse {
    /// The freshly generated slug
    pub slug: String,
    /// The persisted access level
    pub access_type: ShareAccessType,
}

/// A record as revealed to a client that is allowed to read it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareView {
    /// Raw JSON text
    pub content: String,
    /// Last-used view mode
    pub mode: JsonShareMode,
    /// Whether the link is password-gated
    pub is_private: bool,
    /// Access level for non-owners
    #[serde(default)]
    pub access_type: ShareAccessType,
}

impl From<&ShareLinkRecord> for ShareView {
    fn from(record: &ShareLinkRecord) -> Self {
        Self {
            content: record.content.clone(),
            mode: record.mode,
            is_private: record.is_private,
            access_type: record.access_type,
        }
    }
}

/// Body of `POST /api/share/{slug}` (unlock)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnlockRequest {
    /// The link password to verify
    pub password: String,
}

/// Body of `PUT /api/share/{slug}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShareRequest {
    /// Full replacement content
    pub content: String,
    /// View mode to persist
    pub mode: JsonShareMode,
    /// New privacy setting
    pub is_private: bool,
    /// New access level; omitted means viewer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_type: Option<ShareAccessType>,
    /// New password. Absent while `is_private` is true keeps the stored one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Response of `POST /api/upload`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Slug of the record created for the uploaded file
    pub slug: String,
}

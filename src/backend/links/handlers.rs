/**
 * Share-Link HTTP Handlers
 *
 * Axum handlers for the share-link surface consumed by the presentation
 * layer:
 *
 * - `POST /api/share`        - create a link
 * - `GET  /api/share/{slug}` - fetch; content withheld for locked links
 * - `POST /api/share/{slug}` - unlock with a password
 * - `PUT  /api/share/{slug}` - update
 * - `POST /api/upload`       - create a link from an uploaded JSON file
 *
 * There is deliberately no attempt limit on the unlock endpoint; brute
 * force protection is out of scope for this layer.
 */

use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::shared::api::{
    CreateShareRequest, CreateShareResponse, ShareView, UnlockRequest, UpdateShareRequest,
    UploadResponse,
};
use crate::shared::record::{JsonShareMode, ShareAccessType};
use crate::shared::ShareError;

use super::super::error::{bad_request, BackendError};
use super::super::store::DocumentStore;
use super::service::{
    create_share_link, get_share_link, update_share_link, verify_share_link_password,
    ShareLinkInput,
};

impl From<CreateShareRequest> for ShareLinkInput {
    fn from(req: CreateShareRequest) -> Self {
        Self {
            content: req.content,
            mode: req.mode,
            is_private: req.is_private,
            access_type: req.access_type,
            password: req.password,
        }
    }
}

impl From<UpdateShareRequest> for ShareLinkInput {
    fn from(req: UpdateShareRequest) -> Self {
        Self {
            content: req.content,
            mode: req.mode,
            is_private: req.is_private,
            access_type: req.access_type,
            password: req.password,
        }
    }
}

/// Handle `POST /api/share`
pub async fn handle_create_share(
    State(store): State<Arc<dyn DocumentStore>>,
    Json(request): Json<CreateShareRequest>,
) -> Result<impl IntoResponse, BackendError> {
    let record = create_share_link(store.as_ref(), request.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateShareResponse {
            slug: record.slug,
            access_type: record.access_type,
        }),
    ))
}

/// Handle `GET /api/share/{slug}`
///
/// Public links are returned in full. Private links answer 403 with privacy
/// metadata only; the content stays withheld until the caller unlocks.
pub async fn handle_get_share(
    State(store): State<Arc<dyn DocumentStore>>,
    Path(slug): Path<String>,
) -> Result<Response, BackendError> {
    let record = get_share_link(store.as_ref(), &slug)
        .await?
        .ok_or_else(|| ShareError::not_found(&slug))?;

    if record.is_private {
        tracing::debug!("[Links] '{}' is private, withholding content", slug);
        let body = serde_json::json!({
            "error": "password required",
            "status": StatusCode::FORBIDDEN.as_u16(),
            "isPrivate": true,
        });
        return Ok((StatusCode::FORBIDDEN, Json(body)).into_response());
    }

    Ok(Json(ShareView::from(&record)).into_response())
}

/// Handle `POST /api/share/{slug}` (unlock)
///
/// A correct password reveals the full record view; a wrong one answers 401
/// and the caller may retry.
pub async fn handle_unlock_share(
    State(store): State<Arc<dyn DocumentStore>>,
    Path(slug): Path<String>,
    Json(request): Json<UnlockRequest>,
) -> Result<Json<ShareView>, BackendError> {
    let record = get_share_link(store.as_ref(), &slug)
        .await?
        .ok_or_else(|| ShareError::not_found(&slug))?;

    if record.is_private
        && !verify_share_link_password(store.as_ref(), &slug, &request.password).await?
    {
        tracing::debug!("[Links] unlock failed for '{}'", slug);
        return Err(ShareError::InvalidPassword.into());
    }

    Ok(Json(ShareView::from(&record)))
}

/// Handle `PUT /api/share/{slug}`
pub async fn handle_update_share(
    State(store): State<Arc<dyn DocumentStore>>,
    Path(slug): Path<String>,
    Json(request): Json<UpdateShareRequest>,
) -> Result<Json<serde_json::Value>, BackendError> {
    let matched = update_share_link(store.as_ref(), &slug, request.into()).await?;
    if !matched {
        return Err(ShareError::not_found(&slug).into());
    }
    Ok(Json(serde_json::json!({ "success": true })))
}

/// Handle `POST /api/upload`
///
/// Accepts a multipart form with a `file` field, validates that the payload
/// parses as JSON, and creates a public editor link for it (the uploader
/// gets a link anyone can keep working on).
pub async fn handle_upload(
    State(store): State<Arc<dyn DocumentStore>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, BackendError> {
    let mut content: Option<String> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("malformed upload: {}", e)))?
    {
        if field.name() == Some("file") {
            content = Some(
                field
                    .text()
                    .await
                    .map_err(|e| bad_request(format!("unreadable file: {}", e)))?,
            );
            break;
        }
    }

    let Some(content) = content else {
        return Err(bad_request("no file provided"));
    };

    if serde_json::from_str::<serde_json::Value>(&content).is_err() {
        return Err(bad_request("invalid JSON file"));
    }

    let record = create_share_link(
        store.as_ref(),
        ShareLinkInput {
            content,
            mode: JsonShareMode::Visualize,
            is_private: false,
            access_type: Some(ShareAccessType::Editor),
            password: None,
        },
    )
    .await?;

    tracing::info!("[Links] uploaded file stored as '{}'", record.slug);
    Ok(Json(UploadResponse { slug: record.slug }))
}

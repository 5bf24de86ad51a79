/**
 * Share-Link API Client
 *
 * HTTP client functions for the share-link endpoints. Status codes are
 * translated back into the shared error taxonomy so callers handle one
 * error type whether a failure happened on the wire or in the backend.
 */

use reqwest::{Client, StatusCode};

use crate::shared::api::{
    CreateShareRequest, CreateShareResponse, ShareView, UnlockRequest, UpdateShareRequest,
    UploadResponse,
};
use crate::shared::ShareError;

/// Result of fetching a share link
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// The link is public (or already unlocked server-side); full view returned
    Open(ShareView),
    /// The link is private; content withheld until unlocked with a password
    Locked,
    /// No link exists under this slug
    NotFound,
}

/// HTTP client for the share-link API
#[derive(Debug, Clone)]
pub struct ShareLinkApi {
    base_url: String,
    client: Client,
}

impl ShareLinkApi {
    /// Create a client targeting the given server base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Create a new share link
    pub async fn create(
        &self,
        request: &CreateShareRequest,
    ) -> Result<CreateShareResponse, ShareError> {
        let response = self
            .client
            .post(self.url("/api/share"))
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        match response.status() {
            StatusCode::BAD_REQUEST => Err(ShareError::weak_password()),
            status if status.is_success() => response
                .json::<CreateShareResponse>()
                .await
                .map_err(transport_error),
            status => Err(status_error(status)),
        }
    }

    /// Fetch a share link by slug
    ///
    /// A 403 means the link exists but is password-protected; the caller
    /// should prompt for a password and call [`unlock`](Self::unlock).
    pub async fn fetch(&self, slug: &str) -> Result<FetchOutcome, ShareError> {
        let response = self
            .client
            .get(self.url(&format!("/api/share/{}", slug)))
            .send()
            .await
            .map_err(transport_error)?;

        match response.status() {
            StatusCode::FORBIDDEN => Ok(FetchOutcome::Locked),
            StatusCode::NOT_FOUND => Ok(FetchOutcome::NotFound),
            status if status.is_success() => {
                let view = response.json::<ShareView>().await.map_err(transport_error)?;
                Ok(FetchOutcome::Open(view))
            }
            status => Err(status_error(status)),
        }
    }

    /// Unlock a private link with its password
    pub async fn unlock(&self, slug: &str, password: &str) -> Result<ShareView, ShareError> {
        let response = self
            .client
            .post(self.url(&format!("/api/share/{}", slug)))
            .json(&UnlockRequest {
                password: password.to_string(),
            })
            .send()
            .await
            .map_err(transport_error)?;

        match response.status() {
            StatusCode::UNAUTHORIZED => Err(ShareError::InvalidPassword),
            StatusCode::NOT_FOUND => Err(ShareError::not_found(slug)),
            status if status.is_success() => {
                response.json::<ShareView>().await.map_err(transport_error)
            }
            status => Err(status_error(status)),
        }
    }

    /// Update a link's content and sharing settings
    pub async fn update(
        &self,
        slug: &str,
        request: &UpdateShareRequest,
    ) -> Result<(), ShareError> {
        let response = self
            .client
            .put(self.url(&format!("/api/share/{}", slug)))
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(ShareError::not_found(slug)),
            StatusCode::BAD_REQUEST => Err(ShareError::weak_password()),
            status if status.is_success() => Ok(()),
            status => Err(status_error(status)),
        }
    }

    /// Upload a JSON file, creating a public editor link for its contents
    pub async fn upload(
        &self,
        file_name: &str,
        contents: String,
    ) -> Result<UploadResponse, ShareError> {
        let part = reqwest::multipart::Part::text(contents).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.url("/api/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        match response.status() {
            StatusCode::BAD_REQUEST => Err(ShareError::Serialization {
                message: "uploaded file is not valid JSON".to_string(),
            }),
            status if status.is_success() => response
                .json::<UploadResponse>()
                .await
                .map_err(transport_error),
            status => Err(status_error(status)),
        }
    }
}

fn transport_error(err: impl std::fmt::Display) -> ShareError {
    ShareError::store_unavailable(format!("request failed: {}", err))
}

fn status_error(status: StatusCode) -> ShareError {
    ShareError::store_unavailable(format!("unexpected status: {}", status))
}

/**
 * Backend Error Types
 *
 * Errors produced by the HTTP handlers, convertible to HTTP responses. Most
 * of the taxonomy lives in the shared [`ShareError`]; this type adds the
 * handler-local cases (bad uploads, malformed requests) and maps every
 * variant onto a status code.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::ShareError;

/// Backend-specific error type
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., malformed multipart body, invalid request)
    #[error("handler error: {message}")]
    Handler {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// A share-link lifecycle error
    #[error(transparent)]
    Share(#[from] ShareError),
}

impl BackendError {
    /// Create a handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Handler {
            status,
            message: message.into(),
        }
    }

    /// The HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `NotFound` - 404
    /// - `InvalidPassword` - 401
    /// - `WeakPassword` - 400
    /// - `StoreUnavailable` / `RelayUnavailable` - 503
    /// - `SlugExhausted` / `Serialization` - 500
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Handler { status, .. } => *status,
            Self::Share(err) => match err {
                ShareError::NotFound { .. } => StatusCode::NOT_FOUND,
                ShareError::InvalidPassword => StatusCode::UNAUTHORIZED,
                ShareError::WeakPassword { .. } => StatusCode::BAD_REQUEST,
                ShareError::StoreUnavailable { .. } | ShareError::RelayUnavailable { .. } => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                ShareError::SlugExhausted { .. } | ShareError::Serialization { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    /// The human-readable message for this error
    pub fn message(&self) -> String {
        match self {
            Self::Handler { message, .. } => message.clone(),
            Self::Share(err) => err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error_keeps_its_status() {
        let error = BackendError::handler(StatusCode::BAD_REQUEST, "no file provided");
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.message(), "no file provided");
    }

    #[test]
    fn test_share_error_status_mapping() {
        let cases: Vec<(ShareError, StatusCode)> = vec![
            (ShareError::not_found("abc123"), StatusCode::NOT_FOUND),
            (ShareError::InvalidPassword, StatusCode::UNAUTHORIZED),
            (ShareError::weak_password(), StatusCode::BAD_REQUEST),
            (
                ShareError::store_unavailable("down"),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ShareError::RelayUnavailable {
                    message: "socket closed".to_string(),
                },
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ShareError::SlugExhausted { attempts: 20 },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (share, expected) in cases {
            let error: BackendError = share.into();
            assert_eq!(error.status_code(), expected);
        }
    }
}

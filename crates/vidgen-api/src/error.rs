//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use vidgen_client::ClientError;
use vidgen_media::MediaError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Client(e) => match e {
                ClientError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
                ClientError::Media(MediaError::UnsupportedMediaType { .. }) => {
                    StatusCode::UNSUPPORTED_MEDIA_TYPE
                }
                // Mirror the upstream status when the vendor rejected
                // the call.
                ClientError::Api { status, .. } => StatusCode::from_u16(*status)
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn message(&self) -> String {
        match self {
            // The upstream message alone; the structured body rides in
            // `details`.
            ApiError::Client(ClientError::Api { message, .. }) => message.clone(),
            other => other.to_string(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::Client(ClientError::Api { detail, .. }) if !detail.is_null() => {
                Some(detail.clone())
            }
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.message(),
            details: self.details(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_is_mirrored() {
        let err = ApiError::Client(ClientError::Api {
            status: 404,
            message: "Video not found".to_string(),
            detail: serde_json::json!({"error": {"message": "Video not found"}}),
        });
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Video not found");
        assert!(err.details().is_some());
    }

    #[test]
    fn invalid_argument_maps_to_bad_request() {
        let err = ApiError::Client(ClientError::InvalidArgument("prompt is required".into()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unsupported_media_type_maps_to_415() {
        let err = ApiError::Client(ClientError::Media(MediaError::UnsupportedMediaType {
            filename: "anim.gif".to_string(),
            mime: "image/gif".to_string(),
        }));
        assert_eq!(err.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}

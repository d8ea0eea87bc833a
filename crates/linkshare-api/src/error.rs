//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use linkshare_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Human-readable message.
    pub message: String,
    /// Machine-readable error code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// An [`AppError`] on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Map a rejection from one of axum's extractors onto the error payload.
pub(crate) fn from_rejection(status: StatusCode, message: String) -> ApiError {
    let err = if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::payload_too_large(message)
    } else if status.is_server_error() {
        AppError::internal(message)
    } else {
        AppError::validation(message)
    };
    ApiError(err)
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        from_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        from_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        from_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        from_rejection(err.status(), err.body_text())
    }
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound | ErrorKind::InvalidCode => StatusCode::NOT_FOUND,
        ErrorKind::LinkExpired => StatusCode::GONE,
        ErrorKind::AuthenticationRequired => StatusCode::UNAUTHORIZED,
        ErrorKind::OrganizationAccessDenied | ErrorKind::OwnerOnly | ErrorKind::Forbidden => {
            StatusCode::FORBIDDEN
        }
        ErrorKind::AlreadyInOrganization | ErrorKind::OrganizationFull | ErrorKind::Conflict => {
            StatusCode::CONFLICT
        }
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        ErrorKind::Store => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::ContentMissing | ErrorKind::Configuration | ErrorKind::Internal => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for(err.kind);

        if status.is_server_error() {
            tracing::error!(
                code = err.kind.code(),
                error = %err.message,
                source = ?err.source,
                "Request failed"
            );
        }

        let body = ApiErrorResponse {
            message: err.message,
            error: Some(err.kind.code().to_string()),
        };

        (status, Json(body)).into_response()
    }
}

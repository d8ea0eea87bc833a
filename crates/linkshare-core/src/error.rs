//! Unified application error types for LinkShare.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Every [`ErrorKind`] carries a stable
//! machine-readable code that is surfaced to API callers.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The share link (or other resource) does not exist.
    NotFound,
    /// The share link exists but is past its expiry or view budget.
    LinkExpired,
    /// The caller must sign in before the resource can be resolved.
    AuthenticationRequired,
    /// The caller is signed in but is not a member of the owning organization.
    OrganizationAccessDenied,
    /// The operation is restricted to the owner of the share link.
    OwnerOnly,
    /// The caller lacks the platform role required for the operation.
    Forbidden,
    /// The link record exists but its backing object is gone.
    ContentMissing,
    /// A backing store (database or object storage) failed.
    Store,
    /// The user already belongs to an organization.
    AlreadyInOrganization,
    /// The organization has reached its member limit.
    OrganizationFull,
    /// The supplied organization join code matches nothing.
    InvalidCode,
    /// Input validation failed.
    Validation,
    /// The request body exceeds the configured limit.
    PayloadTooLarge,
    /// A conflict occurred (duplicate entry, concurrent modification, etc.).
    Conflict,
    /// A configuration error occurred.
    Configuration,
    /// An internal server error occurred.
    Internal,
}

impl ErrorKind {
    /// Return the machine-readable code exposed in API error payloads.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::LinkExpired => "LINK_EXPIRED",
            Self::AuthenticationRequired => "AUTHENTICATION_REQUIRED",
            Self::OrganizationAccessDenied => "ORGANIZATION_ACCESS_DENIED",
            Self::OwnerOnly => "OWNER_ONLY",
            Self::Forbidden => "FORBIDDEN",
            Self::ContentMissing => "CONTENT_MISSING",
            Self::Store => "STORE_ERROR",
            Self::AlreadyInOrganization => "ALREADY_IN_ORG",
            Self::OrganizationFull => "ORG_FULL",
            Self::InvalidCode => "INVALID_CODE",
            Self::Validation => "VALIDATION_ERROR",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::Conflict => "CONFLICT",
            Self::Configuration => "CONFIGURATION_ERROR",
            Self::Internal => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The unified application error used throughout LinkShare.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a link-expired error.
    pub fn link_expired(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::LinkExpired, message)
    }

    /// Create an authentication-required error.
    pub fn authentication_required(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AuthenticationRequired, message)
    }

    /// Create an organization-access-denied error.
    pub fn organization_access_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::OrganizationAccessDenied, message)
    }

    /// Create an owner-only error.
    pub fn owner_only(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::OwnerOnly, message)
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// Create a content-missing error.
    pub fn content_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ContentMissing, message)
    }

    /// Create a store error.
    pub fn store(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Store, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a payload-too-large error.
    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PayloadTooLarge, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Whether this error is of the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Internal,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Store, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_error_codes() {
        assert_eq!(ErrorKind::AuthenticationRequired.code(), "AUTHENTICATION_REQUIRED");
        assert_eq!(
            ErrorKind::OrganizationAccessDenied.code(),
            "ORGANIZATION_ACCESS_DENIED"
        );
        assert_eq!(ErrorKind::LinkExpired.code(), "LINK_EXPIRED");
        assert_eq!(ErrorKind::ContentMissing.code(), "CONTENT_MISSING");
        assert_eq!(ErrorKind::Store.code(), "STORE_ERROR");
        assert_eq!(ErrorKind::AlreadyInOrganization.code(), "ALREADY_IN_ORG");
    }

    #[test]
    fn test_display_includes_code_and_message() {
        let err = AppError::link_expired("Link expired or maximum views reached");
        assert_eq!(
            err.to_string(),
            "LINK_EXPIRED: Link expired or maximum views reached"
        );
    }

    #[test]
    fn test_io_error_maps_to_store() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let err: AppError = io.into();
        assert!(err.is(ErrorKind::Store));
    }
}

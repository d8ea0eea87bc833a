//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use linkshare_core::error::AppError;

/// `POST /api/organization` body, dispatched on `action`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum OrganizationActionRequest {
    /// Create an organization and become its admin.
    Create(CreateOrganizationRequest),
    /// Join an organization by its secret key.
    Join(JoinOrganizationRequest),
}

/// Organization creation fields.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganizationRequest {
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    /// Free-form description.
    #[validate(length(max = 500))]
    pub description: Option<String>,
    /// Member cap, including the creator.
    #[validate(range(min = 1, message = "maxMembers must be at least 1"))]
    pub max_members: i32,
}

/// Organization join fields.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JoinOrganizationRequest {
    /// The organization's join code.
    #[validate(length(min = 1, max = 32, message = "A secret key is required"))]
    pub secret_key: String,
}

/// `GET /api/share/{linkId}` query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataQuery {
    /// `dashboard` for the owner's management surface.
    pub source: Option<String>,
}

/// `GET /api/share/{linkId}/download` query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DownloadQuery {
    /// Overrides the filename offered to the client.
    pub filename: Option<String>,
}

/// Run `validator` rules and surface failures as `VALIDATION_ERROR`.
pub fn validate<T: Validate>(req: &T) -> Result<(), AppError> {
    req.validate()
        .map_err(|e| AppError::validation(format!("Invalid request: {e}")))
}

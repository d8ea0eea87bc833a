//! Organization entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A named group with a join secret.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Unique organization identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Human-typeable join code, unique across organizations.
    pub secret_key: String,
    /// Member cap enforced at join time.
    pub max_members: i32,
    /// Creator, who becomes the first admin member.
    pub created_by: Uuid,
    /// When the organization was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new organization.
#[derive(Debug, Clone)]
pub struct CreateOrganization {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Join code.
    pub secret_key: String,
    /// Member cap.
    pub max_members: i32,
    /// Creator.
    pub created_by: Uuid,
}

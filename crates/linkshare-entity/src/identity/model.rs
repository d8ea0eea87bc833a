//! Identity value object.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::UserRole;

/// An authenticated user, as asserted by a verified session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// User identifier.
    pub user_id: Uuid,
    /// Email address, if the provider supplied one.
    pub email: Option<String>,
    /// Platform role.
    pub role: UserRole,
}

impl Identity {
    /// Whether this identity may use the platform admin surface.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

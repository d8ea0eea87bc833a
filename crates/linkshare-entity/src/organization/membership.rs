//! Organization membership.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// Role of a user inside their organization.
///
/// Independent from the platform-level [`UserRole`](crate::identity::UserRole).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "org_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrgRole {
    /// Created the organization.
    Admin,
    /// Joined with the secret key.
    Member,
}

impl OrgRole {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }
}

impl fmt::Display for OrgRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Join row between an organization and a user. A user has at most one.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    /// Organization.
    pub organization_id: Uuid,
    /// Member.
    pub user_id: Uuid,
    /// Role inside the organization.
    pub role: OrgRole,
    /// When the user joined.
    pub joined_at: DateTime<Utc>,
}

/// A member as listed to other members.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberView {
    /// Member.
    pub user_id: Uuid,
    /// Role inside the organization.
    pub role: OrgRole,
    /// When the user joined.
    pub joined_at: DateTime<Utc>,
}

impl From<Membership> for MemberView {
    fn from(m: Membership) -> Self {
        Self {
            user_id: m.user_id,
            role: m.role,
            joined_at: m.joined_at,
        }
    }
}

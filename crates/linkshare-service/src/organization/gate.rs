//! Membership checks feeding the access policy.

use std::sync::Arc;

use uuid::Uuid;

use linkshare_core::result::AppResult;
use linkshare_database::store::OrganizationStore;
use linkshare_entity::link::ShareLink;

/// Answers whether a user may see an organization's links.
#[derive(Debug, Clone)]
pub struct MembershipGate {
    organizations: Arc<dyn OrganizationStore>,
}

impl MembershipGate {
    /// Creates a new membership gate.
    pub fn new(organizations: Arc<dyn OrganizationStore>) -> Self {
        Self { organizations }
    }

    /// Whether `user_id` belongs to `organization_id`.
    pub async fn is_member(&self, user_id: Uuid, organization_id: Uuid) -> AppResult<bool> {
        self.organizations.is_member(user_id, organization_id).await
    }

    /// Whether `user_id` owns `link` or belongs to its organization.
    ///
    /// Ownership wins without a membership lookup. A personal link has no
    /// members, so only its owner passes.
    pub async fn is_owner_or_member(&self, user_id: Uuid, link: &ShareLink) -> AppResult<bool> {
        if link.is_owned_by(user_id) {
            return Ok(true);
        }
        match link.organization_id {
            Some(organization_id) => self.is_member(user_id, organization_id).await,
            None => Ok(false),
        }
    }
}

//! Collaborator traits for the link record store and the membership store.

use async_trait::async_trait;
use uuid::Uuid;

use linkshare_core::result::AppResult;
use linkshare_core::types::pagination::{PageRequest, PageResponse};
use linkshare_entity::link::{CreateShareLink, LinkStats, ShareLink};
use linkshare_entity::organization::{CreateOrganization, Membership, OrgRole, Organization};

/// Persistence for [`ShareLink`] records.
///
/// `views` is never written directly: the only mutation after creation is
/// [`try_increment_views`](LinkStore::try_increment_views).
#[async_trait]
pub trait LinkStore: Send + Sync + std::fmt::Debug + 'static {
    /// Look up a link by its public token.
    async fn find_by_link_id(&self, link_id: &str) -> AppResult<Option<ShareLink>>;

    /// Persist a new link with `views = 0`.
    async fn create(&self, data: CreateShareLink) -> AppResult<ShareLink>;

    /// Delete a link record. Returns whether a row was removed.
    async fn delete(&self, link_id: &str) -> AppResult<bool>;

    /// Links uploaded by `owner_id`, newest first.
    async fn find_by_owner(
        &self,
        owner_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ShareLink>>;

    /// Links scoped to `organization_id`, newest first.
    async fn find_by_organization(&self, organization_id: Uuid) -> AppResult<Vec<ShareLink>>;

    /// Increment `views` by one if and only if `views < max_views`, as a
    /// single atomic step.
    ///
    /// Returns the new count, or `None` when no row matched (the budget is
    /// spent or the link is gone).
    async fn try_increment_views(&self, link_id: &str) -> AppResult<Option<i32>>;

    /// Platform-wide aggregates.
    async fn stats(&self) -> AppResult<LinkStats>;

    /// Check whether the store is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

/// Outcome of a capacity-guarded membership insert.
#[derive(Debug, Clone)]
pub enum JoinOutcome {
    /// The membership row was created.
    Joined(Membership),
    /// The organization already holds `max_members` members.
    Full,
}

/// Persistence for organizations and their memberships.
#[async_trait]
pub trait OrganizationStore: Send + Sync + std::fmt::Debug + 'static {
    /// Look up an organization by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Organization>>;

    /// Look up an organization by exact join code.
    async fn find_by_secret_key(&self, secret_key: &str) -> AppResult<Option<Organization>>;

    /// The user's membership, if any. A user has at most one.
    async fn find_membership(&self, user_id: Uuid) -> AppResult<Option<Membership>>;

    /// Whether a membership row exists for `(organization_id, user_id)`.
    async fn is_member(&self, user_id: Uuid, organization_id: Uuid) -> AppResult<bool>;

    /// Create an organization and enrol its creator as admin, atomically.
    ///
    /// Fails with `Conflict` when the secret key is taken and with
    /// `AlreadyInOrganization` when the creator already has a membership.
    async fn create_with_admin(&self, data: CreateOrganization) -> AppResult<Organization>;

    /// Insert a membership unless the organization is at capacity.
    ///
    /// The capacity check and the insert are serialized per organization.
    /// Fails with `AlreadyInOrganization` when the user has any membership
    /// and with `NotFound` when the organization does not exist.
    async fn add_member_within_capacity(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
        role: OrgRole,
    ) -> AppResult<JoinOutcome>;

    /// Members of an organization ordered by join time.
    async fn list_members(&self, organization_id: Uuid) -> AppResult<Vec<Membership>>;

    /// Remove the user's membership. Returns whether a row was removed.
    async fn remove_membership(&self, user_id: Uuid) -> AppResult<bool>;
}

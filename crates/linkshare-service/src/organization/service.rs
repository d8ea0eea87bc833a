//! Organization lifecycle: create, join, leave, and member-only reads.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use linkshare_core::config::OrganizationConfig;
use linkshare_core::error::{AppError, ErrorKind};
use linkshare_core::result::AppResult;
use linkshare_database::store::{JoinOutcome, LinkStore, OrganizationStore};
use linkshare_entity::link::ShareLink;
use linkshare_entity::organization::{
    CreateOrganization, MemberView, Membership, OrgRole, Organization,
};

use super::secret::generate_secret_key;

/// Attempts at drawing an unused join code before giving up.
const MAX_SECRET_ATTEMPTS: usize = 5;

/// Input for creating an organization.
#[derive(Debug, Clone)]
pub struct CreateOrganizationInput {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Member cap, including the creator.
    pub max_members: i32,
}

/// The caller's organization as shown to them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOrganization {
    /// Organization id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Member cap.
    pub max_members: i32,
    /// Current member count.
    pub member_count: usize,
    /// The caller's role.
    pub role: OrgRole,
    /// When the caller joined.
    pub joined_at: DateTime<Utc>,
    /// Join code, shown to organization admins only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
}

/// Manages organizations and memberships.
#[derive(Debug, Clone)]
pub struct OrganizationService {
    organizations: Arc<dyn OrganizationStore>,
    links: Arc<dyn LinkStore>,
    config: OrganizationConfig,
}

impl OrganizationService {
    /// Creates a new organization service.
    pub fn new(
        organizations: Arc<dyn OrganizationStore>,
        links: Arc<dyn LinkStore>,
        config: OrganizationConfig,
    ) -> Self {
        Self {
            organizations,
            links,
            config,
        }
    }

    /// Create an organization; the creator becomes its admin member.
    ///
    /// A user who already belongs to an organization cannot create one.
    pub async fn create_organization(
        &self,
        creator_id: Uuid,
        input: CreateOrganizationInput,
    ) -> AppResult<Organization> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Organization name is required"));
        }
        if input.max_members < 1 || input.max_members > self.config.max_members_limit {
            return Err(AppError::validation(format!(
                "maxMembers must be between 1 and {}",
                self.config.max_members_limit
            )));
        }
        if self.organizations.find_membership(creator_id).await?.is_some() {
            return Err(already_in_organization());
        }

        let description = input
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        for attempt in 1..=MAX_SECRET_ATTEMPTS {
            let data = CreateOrganization {
                name: name.to_string(),
                description: description.clone(),
                secret_key: generate_secret_key(self.config.secret_key_length),
                max_members: input.max_members,
                created_by: creator_id,
            };

            match self.organizations.create_with_admin(data).await {
                Ok(org) => {
                    info!(
                        organization_id = %org.id,
                        user_id = %creator_id,
                        max_members = org.max_members,
                        "Organization created"
                    );
                    return Ok(org);
                }
                Err(e) if e.is(ErrorKind::Conflict) => {
                    debug!(attempt, "Join code collision, drawing another");
                }
                Err(e) => return Err(e),
            }
        }

        warn!(user_id = %creator_id, "Could not draw an unused join code");
        Err(AppError::conflict("Could not generate a unique secret key"))
    }

    /// Join the organization whose join code is `secret_key`.
    ///
    /// Checks, in order: the code names an organization (`INVALID_CODE`),
    /// the user has no membership anywhere (`ALREADY_IN_ORG`), and the
    /// organization has room (`ORG_FULL`).
    pub async fn join_organization(
        &self,
        secret_key: &str,
        user_id: Uuid,
    ) -> AppResult<Organization> {
        let org = self
            .organizations
            .find_by_secret_key(secret_key.trim())
            .await?
            .ok_or_else(|| AppError::new(ErrorKind::InvalidCode, "Invalid organization code"))?;

        if self.organizations.find_membership(user_id).await?.is_some() {
            return Err(already_in_organization());
        }

        match self
            .organizations
            .add_member_within_capacity(org.id, user_id, OrgRole::Member)
            .await?
        {
            JoinOutcome::Joined(_) => {
                info!(organization_id = %org.id, user_id = %user_id, "Organization joined");
                Ok(org)
            }
            JoinOutcome::Full => {
                warn!(organization_id = %org.id, user_id = %user_id, "Organization is full");
                Err(AppError::new(
                    ErrorKind::OrganizationFull,
                    "Organization has reached its member limit",
                ))
            }
        }
    }

    /// Remove the user's membership. Leaving without a membership succeeds.
    pub async fn leave_organization(&self, user_id: Uuid) -> AppResult<()> {
        if self.organizations.remove_membership(user_id).await? {
            info!(user_id = %user_id, "Organization left");
        } else {
            debug!(user_id = %user_id, "Leave without membership");
        }
        Ok(())
    }

    /// The user's organization with their role, or `None`.
    pub async fn get_user_organization(&self, user_id: Uuid) -> AppResult<Option<UserOrganization>> {
        let Some(membership) = self.organizations.find_membership(user_id).await? else {
            return Ok(None);
        };
        let Some(org) = self
            .organizations
            .find_by_id(membership.organization_id)
            .await?
        else {
            return Ok(None);
        };
        let member_count = self.organizations.list_members(org.id).await?.len();

        Ok(Some(UserOrganization {
            id: org.id,
            name: org.name,
            description: org.description,
            max_members: org.max_members,
            member_count,
            role: membership.role,
            joined_at: membership.joined_at,
            secret_key: (membership.role == OrgRole::Admin).then_some(org.secret_key),
        }))
    }

    /// Members of the caller's organization, ordered by join time.
    pub async fn members(&self, user_id: Uuid) -> AppResult<Vec<MemberView>> {
        let membership = self.require_membership(user_id).await?;
        Ok(self
            .organizations
            .list_members(membership.organization_id)
            .await?
            .into_iter()
            .map(MemberView::from)
            .collect())
    }

    /// Links scoped to the caller's organization, newest first.
    pub async fn organization_files(&self, user_id: Uuid) -> AppResult<Vec<ShareLink>> {
        let membership = self.require_membership(user_id).await?;
        self.links
            .find_by_organization(membership.organization_id)
            .await
    }

    async fn require_membership(&self, user_id: Uuid) -> AppResult<Membership> {
        self.organizations
            .find_membership(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("You are not a member of any organization"))
    }
}

fn already_in_organization() -> AppError {
    AppError::new(
        ErrorKind::AlreadyInOrganization,
        "You already belong to an organization",
    )
}

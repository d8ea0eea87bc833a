//! In-memory organization and membership store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use linkshare_core::error::{AppError, ErrorKind};
use linkshare_core::result::AppResult;
use linkshare_entity::organization::{CreateOrganization, Membership, OrgRole, Organization};

use crate::store::{JoinOutcome, OrganizationStore};

#[derive(Debug, Default)]
struct State {
    organizations: HashMap<Uuid, Organization>,
    /// Keyed by user, which enforces one organization per user.
    memberships: HashMap<Uuid, Membership>,
}

impl State {
    fn member_count(&self, organization_id: Uuid) -> usize {
        self.memberships
            .values()
            .filter(|m| m.organization_id == organization_id)
            .count()
    }

    fn already_member() -> AppError {
        AppError::new(
            ErrorKind::AlreadyInOrganization,
            "User already belongs to an organization",
        )
    }
}

/// Organizations and memberships behind a single lock.
#[derive(Debug, Default)]
pub struct MemoryOrganizationStore {
    state: Mutex<State>,
}

impl MemoryOrganizationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrganizationStore for MemoryOrganizationStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Organization>> {
        Ok(self.state.lock().await.organizations.get(&id).cloned())
    }

    async fn find_by_secret_key(&self, secret_key: &str) -> AppResult<Option<Organization>> {
        let state = self.state.lock().await;
        Ok(state
            .organizations
            .values()
            .find(|o| o.secret_key == secret_key)
            .cloned())
    }

    async fn find_membership(&self, user_id: Uuid) -> AppResult<Option<Membership>> {
        Ok(self.state.lock().await.memberships.get(&user_id).cloned())
    }

    async fn is_member(&self, user_id: Uuid, organization_id: Uuid) -> AppResult<bool> {
        let state = self.state.lock().await;
        Ok(state
            .memberships
            .get(&user_id)
            .is_some_and(|m| m.organization_id == organization_id))
    }

    async fn create_with_admin(&self, data: CreateOrganization) -> AppResult<Organization> {
        let mut state = self.state.lock().await;
        if state
            .organizations
            .values()
            .any(|o| o.secret_key == data.secret_key)
        {
            return Err(AppError::conflict("Secret key already in use"));
        }
        if state.memberships.contains_key(&data.created_by) {
            return Err(State::already_member());
        }

        let now = Utc::now();
        let org = Organization {
            id: Uuid::new_v4(),
            name: data.name,
            description: data.description,
            secret_key: data.secret_key,
            max_members: data.max_members,
            created_by: data.created_by,
            created_at: now,
        };
        state.memberships.insert(
            data.created_by,
            Membership {
                organization_id: org.id,
                user_id: data.created_by,
                role: OrgRole::Admin,
                joined_at: now,
            },
        );
        state.organizations.insert(org.id, org.clone());
        Ok(org)
    }

    async fn add_member_within_capacity(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
        role: OrgRole,
    ) -> AppResult<JoinOutcome> {
        let mut state = self.state.lock().await;
        let max_members = state
            .organizations
            .get(&organization_id)
            .map(|o| o.max_members)
            .ok_or_else(|| AppError::not_found("Organization not found"))?;

        if state.member_count(organization_id) >= max_members.max(0) as usize {
            return Ok(JoinOutcome::Full);
        }
        if state.memberships.contains_key(&user_id) {
            return Err(State::already_member());
        }

        let membership = Membership {
            organization_id,
            user_id,
            role,
            joined_at: Utc::now(),
        };
        state.memberships.insert(user_id, membership.clone());
        Ok(JoinOutcome::Joined(membership))
    }

    async fn list_members(&self, organization_id: Uuid) -> AppResult<Vec<Membership>> {
        let state = self.state.lock().await;
        let mut members: Vec<Membership> = state
            .memberships
            .values()
            .filter(|m| m.organization_id == organization_id)
            .cloned()
            .collect();
        members.sort_by(|a, b| a.joined_at.cmp(&b.joined_at));
        Ok(members)
    }

    async fn remove_membership(&self, user_id: Uuid) -> AppResult<bool> {
        Ok(self.state.lock().await.memberships.remove(&user_id).is_some())
    }
}

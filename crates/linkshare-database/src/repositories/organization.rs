//! Organization and membership repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use linkshare_core::error::AppError;
use linkshare_core::result::AppResult;
use linkshare_entity::organization::{CreateOrganization, Membership, OrgRole, Organization};

use crate::error::map_sqlx;
use crate::store::{JoinOutcome, OrganizationStore};

/// Repository for organizations and memberships.
#[derive(Debug, Clone)]
pub struct OrganizationRepository {
    pool: PgPool,
}

impl OrganizationRepository {
    /// Create a new organization repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrganizationStore for OrganizationRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Organization>> {
        sqlx::query_as::<_, Organization>("SELECT * FROM organizations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx("Failed to find organization"))
    }

    async fn find_by_secret_key(&self, secret_key: &str) -> AppResult<Option<Organization>> {
        sqlx::query_as::<_, Organization>("SELECT * FROM organizations WHERE secret_key = $1")
            .bind(secret_key)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx("Failed to find organization by secret key"))
    }

    async fn find_membership(&self, user_id: Uuid) -> AppResult<Option<Membership>> {
        sqlx::query_as::<_, Membership>("SELECT * FROM memberships WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx("Failed to find membership"))
    }

    async fn is_member(&self, user_id: Uuid, organization_id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM memberships WHERE organization_id = $1 AND user_id = $2)",
        )
        .bind(organization_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx("Failed to check membership"))
    }

    async fn create_with_admin(&self, data: CreateOrganization) -> AppResult<Organization> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(map_sqlx("Failed to begin transaction"))?;

        let org = sqlx::query_as::<_, Organization>(
            "INSERT INTO organizations (name, description, secret_key, max_members, created_by) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.secret_key)
        .bind(data.max_members)
        .bind(data.created_by)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx("Failed to create organization"))?;

        sqlx::query("INSERT INTO memberships (organization_id, user_id, role) VALUES ($1, $2, $3)")
            .bind(org.id)
            .bind(data.created_by)
            .bind(OrgRole::Admin)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx("Failed to enrol organization creator"))?;

        tx.commit()
            .await
            .map_err(map_sqlx("Failed to commit organization"))?;
        Ok(org)
    }

    async fn add_member_within_capacity(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
        role: OrgRole,
    ) -> AppResult<JoinOutcome> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(map_sqlx("Failed to begin transaction"))?;

        // Row lock serializes concurrent joins into the same organization.
        let max_members: i32 = sqlx::query_scalar(
            "SELECT max_members FROM organizations WHERE id = $1 FOR UPDATE",
        )
        .bind(organization_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx("Failed to lock organization"))?
        .ok_or_else(|| AppError::not_found("Organization not found"))?;

        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM memberships WHERE organization_id = $1")
                .bind(organization_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(map_sqlx("Failed to count members"))?;

        if count >= i64::from(max_members) {
            tx.rollback()
                .await
                .map_err(map_sqlx("Failed to roll back join"))?;
            return Ok(JoinOutcome::Full);
        }

        let membership = sqlx::query_as::<_, Membership>(
            "INSERT INTO memberships (organization_id, user_id, role) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(organization_id)
        .bind(user_id)
        .bind(role)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx("Failed to add member"))?;

        tx.commit().await.map_err(map_sqlx("Failed to commit join"))?;
        Ok(JoinOutcome::Joined(membership))
    }

    async fn list_members(&self, organization_id: Uuid) -> AppResult<Vec<Membership>> {
        sqlx::query_as::<_, Membership>(
            "SELECT * FROM memberships WHERE organization_id = $1 ORDER BY joined_at ASC",
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx("Failed to list members"))
    }

    async fn remove_membership(&self, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM memberships WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx("Failed to remove membership"))?;
        Ok(result.rows_affected() > 0)
    }
}

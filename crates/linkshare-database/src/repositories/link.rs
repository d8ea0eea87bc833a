//! Share link repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use linkshare_core::result::AppResult;
use linkshare_core::types::pagination::{PageRequest, PageResponse};
use linkshare_entity::link::{CreateShareLink, ExtensionStat, LinkStats, ShareLink};

use crate::error::map_sqlx;
use crate::store::LinkStore;

/// Extension of the file name, or `'other'` when it has none.
const EXTENSION_SQL: &str = r"COALESCE(LOWER(SUBSTRING(file_name FROM '^.+\.([^.]+)$')), 'other')";

/// Repository for share link records.
#[derive(Debug, Clone)]
pub struct LinkRepository {
    pool: PgPool,
}

impl LinkRepository {
    /// Create a new link repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkStore for LinkRepository {
    async fn find_by_link_id(&self, link_id: &str) -> AppResult<Option<ShareLink>> {
        sqlx::query_as::<_, ShareLink>("SELECT * FROM share_links WHERE link_id = $1")
            .bind(link_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx("Failed to find share link"))
    }

    async fn create(&self, data: CreateShareLink) -> AppResult<ShareLink> {
        sqlx::query_as::<_, ShareLink>(
            "INSERT INTO share_links (id, link_id, owner_id, organization_id, object_path, \
             file_name, file_size_bytes, expires_at, max_views, views) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 0) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.link_id)
        .bind(data.owner_id)
        .bind(data.organization_id)
        .bind(&data.object_path)
        .bind(&data.file_name)
        .bind(data.file_size_bytes)
        .bind(data.expires_at)
        .bind(data.max_views)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx("Failed to create share link"))
    }

    async fn delete(&self, link_id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM share_links WHERE link_id = $1")
            .bind(link_id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx("Failed to delete share link"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_by_owner(
        &self,
        owner_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ShareLink>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM share_links WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx("Failed to count share links"))?;

        let links = sqlx::query_as::<_, ShareLink>(
            "SELECT * FROM share_links WHERE owner_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(owner_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx("Failed to list share links"))?;

        Ok(PageResponse::new(
            links,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn find_by_organization(&self, organization_id: Uuid) -> AppResult<Vec<ShareLink>> {
        sqlx::query_as::<_, ShareLink>(
            "SELECT * FROM share_links WHERE organization_id = $1 ORDER BY created_at DESC",
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx("Failed to list organization files"))
    }

    async fn try_increment_views(&self, link_id: &str) -> AppResult<Option<i32>> {
        let views: Option<i32> = sqlx::query_scalar(
            "UPDATE share_links SET views = views + 1 \
             WHERE link_id = $1 AND views < max_views RETURNING views",
        )
        .bind(link_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx("Failed to record view"))?;

        debug!(link_id = %link_id, views = ?views, "Conditional view increment");
        Ok(views)
    }

    async fn stats(&self) -> AppResult<LinkStats> {
        let (total_links, total_bytes, total_views): (i64, i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(file_size_bytes), 0)::BIGINT, \
             COALESCE(SUM(views), 0)::BIGINT FROM share_links",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx("Failed to compute link totals"))?;

        let rows: Vec<(String, i64, i64)> = sqlx::query_as(&format!(
            "SELECT {EXTENSION_SQL} AS extension, COUNT(*) AS count, \
             COALESCE(SUM(file_size_bytes), 0)::BIGINT AS total_bytes \
             FROM share_links GROUP BY 1 ORDER BY count DESC, extension ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx("Failed to compute extension breakdown"))?;

        Ok(LinkStats {
            total_links,
            total_bytes,
            total_views,
            by_extension: rows
                .into_iter()
                .map(|(extension, count, total_bytes)| ExtensionStat {
                    extension,
                    count,
                    total_bytes,
                })
                .collect(),
        })
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(map_sqlx("Health check failed"))
    }
}

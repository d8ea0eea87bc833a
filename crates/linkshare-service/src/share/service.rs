//! Share link creation, listing, deletion, and platform statistics.

use std::sync::Arc;

use bytes::Bytes;
use chrono::{Duration, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

use linkshare_core::config::LinkConfig;
use linkshare_core::error::AppError;
use linkshare_core::result::AppResult;
use linkshare_core::traits::storage::StorageProvider;
use linkshare_core::types::pagination::{PageRequest, PageResponse};
use linkshare_database::store::{LinkStore, OrganizationStore};
use linkshare_entity::identity::Identity;
use linkshare_entity::link::{CreateShareLink, LinkStats, ShareLink};
use linkshare_storage::path::object_path;

use super::token::generate_link_id;

/// A file to share.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Original file name.
    pub file_name: String,
    /// File content.
    pub data: Bytes,
    /// Lifetime in hours; the configured default when absent.
    pub expires_in_hours: Option<u32>,
    /// View budget; the configured default when absent.
    pub max_views: Option<i32>,
    /// Scope the link to the uploader's organization.
    pub share_with_organization: bool,
}

/// A freshly created link and its public URL.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedLink {
    /// The stored record.
    #[serde(flatten)]
    pub link: ShareLink,
    /// `{public_base_url}/share/{linkId}`.
    pub share_url: String,
}

/// Manages the share link lifecycle.
#[derive(Debug, Clone)]
pub struct ShareService {
    links: Arc<dyn LinkStore>,
    organizations: Arc<dyn OrganizationStore>,
    storage: Arc<dyn StorageProvider>,
    config: LinkConfig,
    max_upload_size_bytes: u64,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        links: Arc<dyn LinkStore>,
        organizations: Arc<dyn OrganizationStore>,
        storage: Arc<dyn StorageProvider>,
        config: LinkConfig,
        max_upload_size_bytes: u64,
    ) -> Self {
        Self {
            links,
            organizations,
            storage,
            config,
            max_upload_size_bytes,
        }
    }

    /// Public URL of a link.
    pub fn share_url(&self, link_id: &str) -> String {
        format!(
            "{}/share/{link_id}",
            self.config.public_base_url.trim_end_matches('/')
        )
    }

    /// Store the file and create its link.
    ///
    /// The object is written first. If the record cannot be inserted the
    /// object is deleted again, so no record ever points at missing bytes
    /// and no orphaned object outlives a failed upload.
    pub async fn upload(&self, owner: &Identity, req: UploadRequest) -> AppResult<CreatedLink> {
        let file_name = req.file_name.trim();
        if file_name.is_empty() {
            return Err(AppError::validation("A file name is required"));
        }
        if req.data.is_empty() {
            return Err(AppError::validation("The file is empty"));
        }
        if req.data.len() as u64 > self.max_upload_size_bytes {
            return Err(AppError::validation(format!(
                "File exceeds the {} byte upload limit",
                self.max_upload_size_bytes
            )));
        }

        let expires_in_hours = req
            .expires_in_hours
            .unwrap_or(self.config.default_expiry_hours);
        if expires_in_hours == 0 || expires_in_hours > self.config.max_expiry_hours {
            return Err(AppError::validation(format!(
                "expiresInHours must be between 1 and {}",
                self.config.max_expiry_hours
            )));
        }

        let max_views = req.max_views.unwrap_or(self.config.default_max_views);
        if max_views < 1 || max_views > self.config.max_views_limit {
            return Err(AppError::validation(format!(
                "maxViews must be between 1 and {}",
                self.config.max_views_limit
            )));
        }

        let organization_id = if req.share_with_organization {
            let membership = self
                .organizations
                .find_membership(owner.user_id)
                .await?
                .ok_or_else(|| {
                    AppError::validation("Join an organization before sharing with it")
                })?;
            Some(membership.organization_id)
        } else {
            None
        };

        let link_id = generate_link_id();
        let path = object_path(owner.user_id, &link_id, file_name);
        let size = req.data.len() as i64;

        self.storage.write(&path, req.data).await?;

        let data = CreateShareLink {
            link_id: link_id.clone(),
            owner_id: owner.user_id,
            organization_id,
            object_path: path.clone(),
            file_name: file_name.to_string(),
            file_size_bytes: size,
            expires_at: Utc::now() + Duration::hours(i64::from(expires_in_hours)),
            max_views,
        };

        let link = match self.links.create(data).await {
            Ok(link) => link,
            Err(e) => {
                warn!(link_id = %link_id, error = %e, "Link insert failed, removing object");
                if let Err(cleanup) = self.storage.delete(&path).await {
                    error!(object_path = %path, error = %cleanup, "Rollback delete failed");
                }
                return Err(e);
            }
        };

        info!(
            link_id = %link.link_id,
            user_id = %owner.user_id,
            organization_id = ?link.organization_id,
            size_bytes = link.file_size_bytes,
            max_views = link.max_views,
            "Share link created"
        );

        Ok(CreatedLink {
            share_url: self.share_url(&link.link_id),
            link,
        })
    }

    /// The owner's links, newest first.
    pub async fn list_mine(
        &self,
        owner: &Identity,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ShareLink>> {
        self.links.find_by_owner(owner.user_id, page).await
    }

    /// Delete a link and its object. Owner or platform admin only.
    pub async fn delete(&self, requester: &Identity, link_id: &str) -> AppResult<()> {
        let link = self
            .links
            .find_by_link_id(link_id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found"))?;

        if !link.is_owned_by(requester.user_id) && !requester.is_admin() {
            return Err(AppError::forbidden("Only the owner can delete this link"));
        }

        // Record first: a live record must never point at deleted bytes.
        self.links.delete(link_id).await?;
        if let Err(e) = self.storage.delete(&link.object_path).await {
            error!(object_path = %link.object_path, error = %e, "Orphaned object after link delete");
        }

        info!(link_id = %link_id, user_id = %requester.user_id, "Share link deleted");
        Ok(())
    }

    /// Platform-wide statistics. Platform admins only.
    pub async fn stats(&self, requester: &Identity) -> AppResult<LinkStats> {
        if !requester.is_admin() {
            return Err(AppError::forbidden("Administrator access required"));
        }
        self.links.stats().await
    }
}

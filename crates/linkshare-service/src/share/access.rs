//! Public access to shared files: metadata, download, and owner preview.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use linkshare_core::error::AppError;
use linkshare_core::result::AppResult;
use linkshare_entity::identity::Identity;

use crate::access::{AccessIntent, AccessPolicy, LinkMetadata, RequestSource};
use crate::accounting::ViewAccounting;
use crate::content::{ContentResolver, DispositionKind, ResolvedContent};

/// A file ready to be streamed, with the metadata that authorized it.
#[derive(Debug)]
pub struct ServedFile {
    /// Opened content and response headers.
    pub content: ResolvedContent,
    /// Link state after the view was charged.
    pub metadata: LinkMetadata,
}

/// Serves share links through the access policy.
#[derive(Debug, Clone)]
pub struct ShareAccessService {
    policy: AccessPolicy,
    accounting: ViewAccounting,
    content: ContentResolver,
}

impl ShareAccessService {
    /// Creates a new share access service.
    pub fn new(policy: AccessPolicy, accounting: ViewAccounting, content: ContentResolver) -> Self {
        Self {
            policy,
            accounting,
            content,
        }
    }

    /// Describe a link without charging a view.
    ///
    /// Expired links still describe themselves so the page can say why.
    pub async fn metadata(
        &self,
        link_id: &str,
        requester: Option<&Identity>,
        source: RequestSource,
    ) -> AppResult<LinkMetadata> {
        self.policy
            .resolve_link(link_id, requester, Utc::now(), AccessIntent::Metadata, source)
            .await?
            .into_metadata()
    }

    /// Open the file for download and charge one view.
    ///
    /// The object is opened before the view is charged so a missing object
    /// costs nothing. If the budget ran out between the decision and the
    /// charge, the opened stream is dropped and the link reports expired.
    pub async fn download(
        &self,
        link_id: &str,
        requester: Option<&Identity>,
        filename_override: Option<&str>,
    ) -> AppResult<ServedFile> {
        let (link, mut metadata) = self
            .policy
            .resolve_link(
                link_id,
                requester,
                Utc::now(),
                AccessIntent::Download,
                RequestSource::Public,
            )
            .await?
            .into_allowed()?;

        let download_name = filename_override
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(&link.file_name);

        let content = self
            .content
            .fetch_and_stream(
                &link.object_path,
                &link.file_name,
                download_name,
                DispositionKind::Attachment,
            )
            .await?;

        let consumed = self.accounting.try_consume_view(link_id).await?;
        if !consumed.accepted {
            warn!(link_id = %link_id, "View budget exhausted after authorization");
            return Err(AppError::link_expired(
                "Link expired or maximum views reached",
            ));
        }

        metadata.views = consumed.new_views;
        metadata.is_expired = consumed.new_views >= link.max_views;
        info!(
            link_id = %link_id,
            user_id = ?requester.map(|r| r.user_id),
            views = consumed.new_views,
            max_views = link.max_views,
            "File downloaded"
        );

        Ok(ServedFile { content, metadata })
    }

    /// Open the file inline for its owner. No view is charged.
    pub async fn preview(&self, link_id: &str, requester: Option<&Identity>) -> AppResult<ServedFile> {
        let (link, metadata) = self
            .policy
            .resolve_link(
                link_id,
                requester,
                Utc::now(),
                AccessIntent::Preview,
                RequestSource::OwnerDashboard,
            )
            .await?
            .into_allowed()?;

        let content = self
            .content
            .fetch_and_stream(
                &link.object_path,
                &link.file_name,
                &link.file_name,
                DispositionKind::Inline,
            )
            .await?;

        Ok(ServedFile { content, metadata })
    }
}

//! In-memory link store backed by a concurrent map.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;
use uuid::Uuid;

use linkshare_core::error::AppError;
use linkshare_core::result::AppResult;
use linkshare_core::types::pagination::{PageRequest, PageResponse};
use linkshare_entity::link::{CreateShareLink, ExtensionStat, LinkStats, ShareLink};

use crate::store::LinkStore;

/// Link records keyed by `link_id`.
#[derive(Debug, Default)]
pub struct MemoryLinkStore {
    links: DashMap<String, ShareLink>,
}

impl MemoryLinkStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully formed record, bypassing creation defaults.
    ///
    /// Used to seed fixtures such as already-expired links.
    pub fn insert(&self, link: ShareLink) {
        self.links.insert(link.link_id.clone(), link);
    }

    fn newest_first(mut links: Vec<ShareLink>) -> Vec<ShareLink> {
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        links
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn find_by_link_id(&self, link_id: &str) -> AppResult<Option<ShareLink>> {
        Ok(self.links.get(link_id).map(|l| l.value().clone()))
    }

    async fn create(&self, data: CreateShareLink) -> AppResult<ShareLink> {
        let link = data.into_link(Utc::now());
        match self.links.entry(link.link_id.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict("Link id already exists")),
            Entry::Vacant(slot) => {
                slot.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn delete(&self, link_id: &str) -> AppResult<bool> {
        Ok(self.links.remove(link_id).is_some())
    }

    async fn find_by_owner(
        &self,
        owner_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ShareLink>> {
        let owned = Self::newest_first(
            self.links
                .iter()
                .filter(|l| l.owner_id == owner_id)
                .map(|l| l.value().clone())
                .collect(),
        );
        let total = owned.len() as u64;
        let items = owned
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    async fn find_by_organization(&self, organization_id: Uuid) -> AppResult<Vec<ShareLink>> {
        Ok(Self::newest_first(
            self.links
                .iter()
                .filter(|l| l.organization_id == Some(organization_id))
                .map(|l| l.value().clone())
                .collect(),
        ))
    }

    async fn try_increment_views(&self, link_id: &str) -> AppResult<Option<i32>> {
        // The shard write lock held by `get_mut` makes check-and-increment atomic.
        let views = self.links.get_mut(link_id).and_then(|mut link| {
            if link.views < link.max_views {
                link.views += 1;
                Some(link.views)
            } else {
                None
            }
        });
        debug!(link_id = %link_id, views = ?views, "Conditional view increment");
        Ok(views)
    }

    async fn stats(&self) -> AppResult<LinkStats> {
        let mut stats = LinkStats::default();
        let mut by_extension: BTreeMap<String, (i64, i64)> = BTreeMap::new();

        for link in self.links.iter() {
            stats.total_links += 1;
            stats.total_bytes += link.file_size_bytes;
            stats.total_views += i64::from(link.views);
            let ext = link.extension().unwrap_or_else(|| "other".to_string());
            let entry = by_extension.entry(ext).or_default();
            entry.0 += 1;
            entry.1 += link.file_size_bytes;
        }

        stats.by_extension = by_extension
            .into_iter()
            .map(|(extension, (count, total_bytes))| ExtensionStat {
                extension,
                count,
                total_bytes,
            })
            .collect();
        // Stable sort keeps the alphabetical order among equal counts.
        stats.by_extension.sort_by(|a, b| b.count.cmp(&a.count));
        Ok(stats)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

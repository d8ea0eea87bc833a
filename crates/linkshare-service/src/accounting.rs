//! View-count accounting.
//!
//! A view is charged through the link store's conditional increment, the
//! single serialization point for a link's counter. No in-process locking
//! is involved, so the bound holds across processes sharing one store.

use std::sync::Arc;

use tracing::{info, warn};

use linkshare_core::result::AppResult;
use linkshare_database::store::LinkStore;

/// Result of [`ViewAccounting::try_consume_view`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewConsumption {
    /// Whether this call consumed a view.
    pub accepted: bool,
    /// The counter after the call (unchanged when not accepted).
    pub new_views: i32,
}

/// Charges views against a link's budget.
#[derive(Debug, Clone)]
pub struct ViewAccounting {
    links: Arc<dyn LinkStore>,
}

impl ViewAccounting {
    /// Creates a new accounting service.
    pub fn new(links: Arc<dyn LinkStore>) -> Self {
        Self { links }
    }

    /// Increment the link's counter by one if `views < max_views`.
    ///
    /// At most `max_views` calls are ever accepted for a link, however many
    /// run concurrently.
    pub async fn try_consume_view(&self, link_id: &str) -> AppResult<ViewConsumption> {
        match self.links.try_increment_views(link_id).await? {
            Some(new_views) => {
                info!(link_id = %link_id, views = new_views, "View consumed");
                Ok(ViewConsumption {
                    accepted: true,
                    new_views,
                })
            }
            None => {
                let current = self
                    .links
                    .find_by_link_id(link_id)
                    .await?
                    .map(|l| l.views)
                    .unwrap_or_default();
                warn!(link_id = %link_id, views = current, "View budget exhausted");
                Ok(ViewConsumption {
                    accepted: false,
                    new_views: current,
                })
            }
        }
    }
}

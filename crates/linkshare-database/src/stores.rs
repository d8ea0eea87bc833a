//! Store selection by configured backend.

use std::sync::Arc;

use tracing::info;

use linkshare_core::config::{DatabaseBackend, DatabaseConfig};
use linkshare_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::{MemoryLinkStore, MemoryOrganizationStore};
use crate::migration::run_migrations;
use crate::repositories::{LinkRepository, OrganizationRepository};
use crate::store::{LinkStore, OrganizationStore};

/// The link record store and membership store chosen for this process.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Link records.
    pub links: Arc<dyn LinkStore>,
    /// Organizations and memberships.
    pub organizations: Arc<dyn OrganizationStore>,
}

impl Stores {
    /// Build the stores named by `config.backend`.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.backend {
            DatabaseBackend::Postgres => {
                info!("Initializing PostgreSQL stores");
                let db = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(db.pool()).await?;
                }
                Ok(Self {
                    links: Arc::new(LinkRepository::new(db.pool().clone())),
                    organizations: Arc::new(OrganizationRepository::new(db.pool().clone())),
                })
            }
            DatabaseBackend::Memory => {
                info!("Initializing in-memory stores; state is lost on restart");
                Ok(Self::in_memory())
            }
        }
    }

    /// Fresh, empty in-memory stores.
    pub fn in_memory() -> Self {
        Self {
            links: Arc::new(MemoryLinkStore::new()),
            organizations: Arc::new(MemoryOrganizationStore::new()),
        }
    }
}

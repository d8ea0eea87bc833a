//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use linkshare_auth::JwtDecoder;
use linkshare_core::config::AppConfig;
use linkshare_core::traits::storage::StorageProvider;
use linkshare_database::Stores;
use linkshare_database::store::LinkStore;
use linkshare_service::{
    AccessPolicy, ContentResolver, MembershipGate, OrganizationService, ShareAccessService,
    ShareService, ViewAccounting,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Link record store
    pub links: Arc<dyn LinkStore>,
    /// Object storage
    pub storage: Arc<dyn StorageProvider>,

    // ── Auth ─────────────────────────────────────────────────
    /// Session token verifier
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Metadata, download, and preview
    pub share_access: Arc<ShareAccessService>,
    /// Upload, listing, deletion, and stats
    pub share_service: Arc<ShareService>,
    /// Organization lifecycle
    pub organization_service: Arc<OrganizationService>,
}

impl AppState {
    /// Wire every service over the given stores and object storage.
    pub fn new(config: AppConfig, stores: Stores, storage: Arc<dyn StorageProvider>) -> Self {
        let gate = Arc::new(MembershipGate::new(Arc::clone(&stores.organizations)));
        let policy = AccessPolicy::new(Arc::clone(&stores.links), gate);
        let share_access = ShareAccessService::new(
            policy,
            ViewAccounting::new(Arc::clone(&stores.links)),
            ContentResolver::new(Arc::clone(&storage)),
        );
        let share_service = ShareService::new(
            Arc::clone(&stores.links),
            Arc::clone(&stores.organizations),
            Arc::clone(&storage),
            config.links.clone(),
            config.storage.max_upload_size_bytes,
        );
        let organization_service = OrganizationService::new(
            Arc::clone(&stores.organizations),
            Arc::clone(&stores.links),
            config.organizations.clone(),
        );

        Self {
            jwt_decoder: Arc::new(JwtDecoder::new(&config.auth)),
            config: Arc::new(config),
            links: stores.links,
            storage,
            share_access: Arc::new(share_access),
            share_service: Arc::new(share_service),
            organization_service: Arc::new(organization_service),
        }
    }
}

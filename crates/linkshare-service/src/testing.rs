//! Shared fixtures for service tests: in-memory stores over a temporary
//! object directory.

use std::sync::Arc;

use bytes::Bytes;
use chrono::{Duration, Utc};
use tempfile::TempDir;
use uuid::Uuid;

use linkshare_core::config::AppConfig;
use linkshare_core::traits::storage::StorageProvider;
use linkshare_database::memory::{MemoryLinkStore, MemoryOrganizationStore};
use linkshare_database::store::{JoinOutcome, LinkStore, OrganizationStore};
use linkshare_entity::identity::{Identity, UserRole};
use linkshare_entity::link::{CreateShareLink, ShareLink};
use linkshare_entity::organization::{CreateOrganization, OrgRole, Organization};
use linkshare_storage::LocalStorageProvider;
use linkshare_storage::path::object_path;

use crate::access::AccessPolicy;
use crate::accounting::ViewAccounting;
use crate::content::ContentResolver;
use crate::organization::{MembershipGate, OrganizationService};
use crate::share::{ShareAccessService, ShareService, token::generate_link_id};

pub(crate) struct Fixture {
    _dir: TempDir,
    pub links: Arc<dyn LinkStore>,
    pub organizations: Arc<dyn OrganizationStore>,
    pub storage: Arc<dyn StorageProvider>,
    pub config: AppConfig,
}

impl Fixture {
    pub async fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorageProvider::new(dir.path().to_str().unwrap())
            .await
            .unwrap();
        Self {
            links: Arc::new(MemoryLinkStore::new()),
            organizations: Arc::new(MemoryOrganizationStore::new()),
            storage: Arc::new(storage),
            config: AppConfig::default(),
            _dir: dir,
        }
    }

    pub fn gate(&self) -> Arc<MembershipGate> {
        Arc::new(MembershipGate::new(self.organizations.clone()))
    }

    pub fn policy(&self) -> AccessPolicy {
        AccessPolicy::new(self.links.clone(), self.gate())
    }

    pub fn share_access(&self) -> ShareAccessService {
        ShareAccessService::new(
            self.policy(),
            ViewAccounting::new(self.links.clone()),
            ContentResolver::new(self.storage.clone()),
        )
    }

    pub fn share_service(&self) -> ShareService {
        ShareService::new(
            self.links.clone(),
            self.organizations.clone(),
            self.storage.clone(),
            self.config.links.clone(),
            self.config.storage.max_upload_size_bytes,
        )
    }

    pub fn organization_service(&self) -> OrganizationService {
        OrganizationService::new(
            self.organizations.clone(),
            self.links.clone(),
            self.config.organizations.clone(),
        )
    }

    /// Create an organization with `creator` as its admin.
    pub async fn create_org(&self, creator: &Identity, key: &str, max_members: i32) -> Organization {
        self.organizations
            .create_with_admin(CreateOrganization {
                name: format!("org {key}"),
                description: None,
                secret_key: key.to_string(),
                max_members,
                created_by: creator.user_id,
            })
            .await
            .unwrap()
    }

    pub async fn join_org(&self, member: &Identity, org: &Organization) {
        let outcome = self
            .organizations
            .add_member_within_capacity(org.id, member.user_id, OrgRole::Member)
            .await
            .unwrap();
        assert!(matches!(outcome, JoinOutcome::Joined(_)));
    }
}

pub(crate) fn user() -> Identity {
    Identity {
        user_id: Uuid::new_v4(),
        email: None,
        role: UserRole::User,
    }
}

pub(crate) fn admin() -> Identity {
    Identity {
        role: UserRole::Admin,
        ..user()
    }
}

/// A personal link record with no stored object.
pub(crate) async fn link_fixture(fx: &Fixture, max_views: i32) -> ShareLink {
    let owner = user();
    let link_id = generate_link_id();
    fx.links
        .create(CreateShareLink {
            object_path: object_path(owner.user_id, &link_id, "f.txt"),
            link_id,
            owner_id: owner.user_id,
            organization_id: None,
            file_name: "f.txt".into(),
            file_size_bytes: 1,
            expires_at: Utc::now() + Duration::hours(1),
            max_views,
        })
        .await
        .unwrap()
}

/// A link record whose object holds `content`.
pub(crate) async fn stored_link(
    fx: &Fixture,
    owner: &Identity,
    organization_id: Option<Uuid>,
    content: &'static [u8],
    max_views: i32,
) -> ShareLink {
    let link_id = generate_link_id();
    let path = object_path(owner.user_id, &link_id, "file.txt");
    fx.storage
        .write(&path, Bytes::from_static(content))
        .await
        .unwrap();
    fx.links
        .create(CreateShareLink {
            link_id,
            owner_id: owner.user_id,
            organization_id,
            object_path: path,
            file_name: "file.txt".into(),
            file_size_bytes: content.len() as i64,
            expires_at: Utc::now() + Duration::hours(1),
            max_views,
        })
        .await
        .unwrap()
}

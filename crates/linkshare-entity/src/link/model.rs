//! Share link entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One shareable file.
///
/// `views` is only ever changed through the store's conditional increment.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ShareLink {
    /// Internal key.
    pub id: Uuid,
    /// Public opaque token used in `/share/{linkId}` URLs.
    pub link_id: String,
    /// User who uploaded the file.
    pub owner_id: Uuid,
    /// Owning organization. `None` means a personal link.
    pub organization_id: Option<Uuid>,
    /// Locator of the bytes in the object store.
    #[serde(skip_serializing)]
    pub object_path: String,
    /// Original file name.
    pub file_name: String,
    /// Size in bytes.
    pub file_size_bytes: i64,
    /// When the link was created.
    pub created_at: DateTime<Utc>,
    /// Absolute expiry, fixed at creation.
    pub expires_at: DateTime<Utc>,
    /// View budget.
    pub max_views: i32,
    /// Views consumed so far.
    pub views: i32,
}

impl ShareLink {
    /// Past expiry or out of views.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at || self.views >= self.max_views
    }

    /// Whether this link is scoped to an organization.
    pub fn is_organization_file(&self) -> bool {
        self.organization_id.is_some()
    }

    /// Whether `user_id` uploaded this link.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    /// Lowercased extension of the file name, if any.
    pub fn extension(&self) -> Option<String> {
        file_extension(&self.file_name)
    }
}

/// Lowercased extension of a file name (`"report.PDF"` gives `"pdf"`).
pub fn file_extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Data required to create a new share link.
#[derive(Debug, Clone)]
pub struct CreateShareLink {
    /// Public token.
    pub link_id: String,
    /// Uploader.
    pub owner_id: Uuid,
    /// Organization scope.
    pub organization_id: Option<Uuid>,
    /// Object store locator.
    pub object_path: String,
    /// Original file name.
    pub file_name: String,
    /// Size in bytes.
    pub file_size_bytes: i64,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
    /// View budget.
    pub max_views: i32,
}

impl CreateShareLink {
    /// Materialize the row the store will persist. `views` starts at 0.
    pub fn into_link(self, now: DateTime<Utc>) -> ShareLink {
        ShareLink {
            id: Uuid::new_v4(),
            link_id: self.link_id,
            owner_id: self.owner_id,
            organization_id: self.organization_id,
            object_path: self.object_path,
            file_name: self.file_name,
            file_size_bytes: self.file_size_bytes,
            created_at: now,
            expires_at: self.expires_at,
            max_views: self.max_views,
            views: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn link(expires_in: Duration, views: i32, max_views: i32) -> ShareLink {
        CreateShareLink {
            link_id: "abc".into(),
            owner_id: Uuid::new_v4(),
            organization_id: None,
            object_path: "o/abc/f.txt".into(),
            file_name: "f.txt".into(),
            file_size_bytes: 3,
            expires_at: Utc::now() + expires_in,
            max_views,
        }
        .into_link(Utc::now())
        .with_views(views)
    }

    impl ShareLink {
        fn with_views(mut self, views: i32) -> Self {
            self.views = views;
            self
        }
    }

    #[test]
    fn test_expired_by_time_or_views() {
        let now = Utc::now();
        assert!(!link(Duration::hours(1), 0, 1).is_expired_at(now));
        assert!(link(Duration::hours(-1), 0, 5).is_expired_at(now));
        assert!(link(Duration::hours(1), 5, 5).is_expired_at(now));
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("report.PDF").as_deref(), Some("pdf"));
        assert_eq!(file_extension("archive.tar.gz").as_deref(), Some("gz"));
        assert_eq!(file_extension("README"), None);
        assert_eq!(file_extension(".bashrc"), None);
    }
}

//! Access decision types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use linkshare_core::error::AppError;
use linkshare_entity::identity::Identity;
use linkshare_entity::link::ShareLink;

/// What the requester wants to do with the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessIntent {
    /// Owner-only inline view. Never consumes a view.
    Preview,
    /// Transfer the file. Consumes a view when allowed.
    Download,
    /// Read the revealable metadata.
    Metadata,
}

/// Which surface the request comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestSource {
    /// The public `/share/{linkId}` page or a direct API call.
    #[default]
    Public,
    /// The owner's management dashboard.
    OwnerDashboard,
}

/// Fields that may be revealed on `Allow` or `Expired`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkMetadata {
    /// Original file name.
    pub file_name: String,
    /// Size in bytes.
    pub file_size_bytes: i64,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
    /// View budget.
    pub max_views: i32,
    /// Views consumed so far.
    pub views: i32,
    /// Whether the link is organization-scoped.
    pub is_organization_file: bool,
    /// Whether the requester uploaded the link.
    pub is_owner: bool,
    /// Past expiry or out of views at evaluation time.
    pub is_expired: bool,
}

impl LinkMetadata {
    /// Project a link as seen by `requester` at `now`.
    pub fn of(link: &ShareLink, requester: Option<&Identity>, now: DateTime<Utc>) -> Self {
        Self {
            file_name: link.file_name.clone(),
            file_size_bytes: link.file_size_bytes,
            expires_at: link.expires_at,
            max_views: link.max_views,
            views: link.views,
            is_organization_file: link.is_organization_file(),
            is_owner: requester.is_some_and(|r| link.is_owned_by(r.user_id)),
            is_expired: link.is_expired_at(now),
        }
    }
}

/// Outcome of evaluating a link request.
///
/// Denials carry nothing about the file; only `Expired` and `Allow`
/// reveal metadata.
#[derive(Debug, Clone)]
pub enum AccessDecision {
    /// No record for the token.
    NotFound,
    /// Past expiry or out of views.
    Expired(LinkMetadata),
    /// Organization link requested anonymously.
    OrgAuthRequired,
    /// Signed-in requester outside the owning organization.
    OrgAccessDenied,
    /// Owner-only surface requested by someone else.
    OwnerOnlyDenied,
    /// Proceed.
    Allow {
        /// The resolved record.
        link: Box<ShareLink>,
        /// Revealable metadata.
        metadata: LinkMetadata,
    },
}

impl AccessDecision {
    /// Stable name of the decision, for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Expired(_) => "expired",
            Self::OrgAuthRequired => "org_auth_required",
            Self::OrgAccessDenied => "org_access_denied",
            Self::OwnerOnlyDenied => "owner_only_denied",
            Self::Allow { .. } => "allow",
        }
    }

    /// Whether the decision is `Allow`.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow { .. })
    }

    /// Unwrap `Allow`, turning every other decision into its error.
    pub fn into_allowed(self) -> Result<(ShareLink, LinkMetadata), AppError> {
        match self {
            Self::Allow { link, metadata } => Ok((*link, metadata)),
            other => Err(other.denial_error()),
        }
    }

    /// Metadata for `Allow` and `Expired`; denials become errors.
    pub fn into_metadata(self) -> Result<LinkMetadata, AppError> {
        match self {
            Self::Allow { metadata, .. } | Self::Expired(metadata) => Ok(metadata),
            other => Err(other.denial_error()),
        }
    }

    fn denial_error(&self) -> AppError {
        match self {
            Self::NotFound => AppError::not_found("Link not found"),
            Self::Expired(_) => AppError::link_expired("Link expired or maximum views reached"),
            Self::OrgAuthRequired => AppError::authentication_required(
                "Sign in to access files shared within an organization",
            ),
            Self::OrgAccessDenied => AppError::organization_access_denied(
                "This file is only available to members of its organization",
            ),
            Self::OwnerOnlyDenied => {
                AppError::owner_only("Only the owner of this file can access it here")
            }
            Self::Allow { .. } => AppError::internal("Allowed decision treated as a denial"),
        }
    }
}

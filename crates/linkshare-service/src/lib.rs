//! # linkshare-service
//!
//! The decision logic behind share links. Services follow constructor
//! injection: every collaborator is handed in as an `Arc` at construction.
//!
//! - [`access`] decides whether a link may be resolved, in a fixed order.
//! - [`accounting`] charges views through the store's conditional increment.
//! - [`organization`] answers membership questions and manages organizations.
//! - [`content`] streams the stored object with the right headers.
//! - [`share`] ties these together for upload, download, and deletion.

pub mod access;
pub mod accounting;
pub mod content;
pub mod organization;
pub mod share;

#[cfg(test)]
pub(crate) mod testing;

pub use access::{AccessDecision, AccessIntent, AccessPolicy, LinkMetadata, RequestSource};
pub use accounting::{ViewAccounting, ViewConsumption};
pub use content::{ContentResolver, DispositionKind, ResolvedContent};
pub use organization::{MembershipGate, OrganizationService, UserOrganization};
pub use share::{ServedFile, ShareAccessService, ShareService, UploadRequest};

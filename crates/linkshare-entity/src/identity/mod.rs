//! Authenticated identities supplied by the identity provider.

pub mod model;
pub mod role;

pub use model::Identity;
pub use role::UserRole;

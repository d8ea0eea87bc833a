//! Organization domain entities.

pub mod membership;
pub mod model;

pub use membership::{Membership, MemberView, OrgRole};
pub use model::{CreateOrganization, Organization};

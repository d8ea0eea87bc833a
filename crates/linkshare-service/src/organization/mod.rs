//! Organization membership gate and organization lifecycle.

pub mod gate;
pub mod secret;
pub mod service;

pub use gate::MembershipGate;
pub use service::{CreateOrganizationInput, OrganizationService, UserOrganization};

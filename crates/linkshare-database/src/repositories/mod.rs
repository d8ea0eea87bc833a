//! PostgreSQL implementations of the store traits.

pub mod link;
pub mod organization;

pub use link::LinkRepository;
pub use organization::OrganizationRepository;

//! Process-local store implementations for development and tests.
//!
//! These honour the same atomicity contracts as the PostgreSQL
//! repositories within a single process only.

pub mod link;
pub mod organization;

pub use link::MemoryLinkStore;
pub use organization::MemoryOrganizationStore;

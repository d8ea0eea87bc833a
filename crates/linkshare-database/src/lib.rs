//! # linkshare-database
//!
//! Link record and organization membership stores. The [`LinkStore`] and
//! [`OrganizationStore`] traits are implemented twice: by PostgreSQL
//! repositories for production and by process-local maps for development
//! and tests. [`Stores::connect`] picks one according to configuration.

pub mod connection;
pub mod error;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;
pub mod stores;

pub use connection::DatabasePool;
pub use store::{JoinOutcome, LinkStore, OrganizationStore};
pub use stores::Stores;

//! Custom Axum extractors.

pub mod auth;
pub mod pagination;
pub mod rejection;

pub use auth::{AuthUser, MaybeIdentity};
pub use pagination::PaginationParams;
pub use rejection::{ApiJson, ApiMultipart, ApiQuery};

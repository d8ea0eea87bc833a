//! # linkshare-api
//!
//! HTTP API layer for LinkShare built on Axum.
//!
//! Provides the share, upload, link management, organization, admin, and
//! health endpoints, the identity extractors, and the mapping from
//! [`AppError`](linkshare_core::AppError) to `{ message, error }` payloads.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;

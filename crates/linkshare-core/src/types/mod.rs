//! Core type definitions used across the LinkShare workspace.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};

//! Route handlers organized by domain.

pub mod admin;
pub mod health;
pub mod links;
pub mod organization;
pub mod share;
pub mod upload;

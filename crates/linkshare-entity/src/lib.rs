//! # linkshare-entity
//!
//! Domain entity models for LinkShare. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities derive `sqlx::FromRow`.

pub mod identity;
pub mod link;
pub mod organization;

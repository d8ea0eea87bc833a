//! # linkshare-auth
//!
//! Adapter for the external identity provider. Session tokens are HS256
//! JWTs signed with a secret shared with the provider; [`JwtDecoder`] turns
//! a valid token into an [`Identity`](linkshare_entity::identity::Identity).
//! [`JwtEncoder`] mints compatible tokens for development and tests.

pub mod jwt;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};

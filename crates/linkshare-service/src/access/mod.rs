//! Access policy for share links.

pub mod decision;
pub mod policy;

pub use decision::{AccessDecision, AccessIntent, LinkMetadata, RequestSource};
pub use policy::{AccessPolicy, evaluate, membership_question};

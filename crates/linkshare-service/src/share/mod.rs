//! Share link lifecycle and resolution.

pub mod access;
pub mod service;
pub mod token;

pub use access::{ServedFile, ShareAccessService};
pub use service::{CreatedLink, ShareService, UploadRequest};
pub use token::generate_link_id;

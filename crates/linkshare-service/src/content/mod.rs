//! Streaming stored objects back to requesters.

pub mod disposition;
pub mod mime;
pub mod resolver;

pub use disposition::{DispositionKind, content_disposition};
pub use mime::content_type_for;
pub use resolver::{ContentResolver, ResolvedContent};

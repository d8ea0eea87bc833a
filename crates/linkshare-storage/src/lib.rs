//! # linkshare-storage
//!
//! Object storage for LinkShare. Objects are addressed by the path stored
//! on each share link; see [`path::object_path`].

pub mod path;
pub mod providers;

pub use path::{object_path, sanitize_file_name};
pub use providers::LocalStorageProvider;

//! Share link entities.

pub mod model;
pub mod stats;

pub use model::{CreateShareLink, ShareLink};
pub use stats::{ExtensionStat, LinkStats};

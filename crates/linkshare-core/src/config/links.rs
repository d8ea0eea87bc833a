//! Share link creation limits.

use serde::{Deserialize, Serialize};

/// Limits applied when a share link is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Expiry applied when the uploader does not pick one.
    #[serde(default = "default_expiry_hours")]
    pub default_expiry_hours: u32,
    /// Upper bound on a link's lifetime.
    #[serde(default = "default_max_expiry_hours")]
    pub max_expiry_hours: u32,
    /// View budget applied when the uploader does not pick one.
    #[serde(default = "default_max_views")]
    pub default_max_views: i32,
    /// Upper bound on a link's view budget.
    #[serde(default = "default_max_views_limit")]
    pub max_views_limit: i32,
    /// Public origin used to build `/share/{linkId}` URLs.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            default_expiry_hours: default_expiry_hours(),
            max_expiry_hours: default_max_expiry_hours(),
            default_max_views: default_max_views(),
            max_views_limit: default_max_views_limit(),
            public_base_url: default_public_base_url(),
        }
    }
}

fn default_expiry_hours() -> u32 {
    24
}

fn default_max_expiry_hours() -> u32 {
    24 * 30
}

fn default_max_views() -> i32 {
    5
}

fn default_max_views_limit() -> i32 {
    1000
}

fn default_public_base_url() -> String {
    "http://localhost:8080".to_string()
}

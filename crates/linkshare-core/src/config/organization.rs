//! Organization limits.

use serde::{Deserialize, Serialize};

/// Organization creation limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationConfig {
    /// Length of generated join codes.
    #[serde(default = "default_secret_key_length")]
    pub secret_key_length: usize,
    /// Largest `maxMembers` a creator may request.
    #[serde(default = "default_max_members_limit")]
    pub max_members_limit: i32,
}

impl Default for OrganizationConfig {
    fn default() -> Self {
        Self {
            secret_key_length: default_secret_key_length(),
            max_members_limit: default_max_members_limit(),
        }
    }
}

fn default_secret_key_length() -> usize {
    6
}

fn default_max_members_limit() -> i32 {
    500
}

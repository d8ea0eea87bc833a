//! Platform-wide link statistics.

use serde::{Deserialize, Serialize};

/// Aggregate counters over every share link.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStats {
    /// Number of links.
    pub total_links: i64,
    /// Sum of file sizes.
    pub total_bytes: i64,
    /// Sum of consumed views.
    pub total_views: i64,
    /// Breakdown by lowercased file extension, largest count first.
    pub by_extension: Vec<ExtensionStat>,
}

/// Link count for one file extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionStat {
    /// Extension, or `"other"` when the file name has none.
    pub extension: String,
    /// Number of links.
    pub count: i64,
    /// Sum of file sizes.
    pub total_bytes: i64,
}

//! Object path construction.

use uuid::Uuid;

/// Replace every character outside `[A-Za-z0-9.-]` with `_`.
///
/// A name made only of dots would resolve to a directory entry, so it is
/// replaced too.
pub fn sanitize_file_name(file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if safe.is_empty() || safe.chars().all(|c| c == '.') {
        "_".repeat(safe.len().max(1))
    } else {
        safe
    }
}

/// Locator for a link's object: `{owner}/{linkId}/{sanitizedFileName}`.
pub fn object_path(owner_id: Uuid, link_id: &str, file_name: &str) -> String {
    format!("{owner_id}/{link_id}/{}", sanitize_file_name(file_name))
}

//! `Content-Disposition` header values.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Bytes left unescaped in file names. Safe both inside a quoted string
/// and as an RFC 5987 `ext-value`.
const FILENAME: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// How the browser should treat the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispositionKind {
    /// Save as a file.
    Attachment,
    /// Render in place (owner previews).
    Inline,
}

impl DispositionKind {
    /// Header token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Attachment => "attachment",
            Self::Inline => "inline",
        }
    }
}

/// Header value with the file name percent-encoded in both parameters.
pub fn content_disposition(kind: DispositionKind, file_name: &str) -> String {
    let encoded = utf8_percent_encode(file_name, FILENAME).to_string();
    format!(
        "{}; filename=\"{encoded}\"; filename*=UTF-8''{encoded}",
        kind.as_str()
    )
}

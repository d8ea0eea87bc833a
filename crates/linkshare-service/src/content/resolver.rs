//! Opens a link's stored object for streaming.

use std::sync::Arc;

use tracing::{debug, error};

use linkshare_core::error::{AppError, ErrorKind};
use linkshare_core::result::AppResult;
use linkshare_core::traits::storage::{ByteStream, StorageProvider};

use super::disposition::{DispositionKind, content_disposition};
use super::mime::content_type_for;

/// An opened object ready to be written to a response.
pub struct ResolvedContent {
    /// Object bytes, read lazily.
    pub stream: ByteStream,
    /// Object size.
    pub content_length: u64,
    /// MIME type from the file name.
    pub content_type: &'static str,
    /// `Content-Disposition` value.
    pub content_disposition: String,
}

impl std::fmt::Debug for ResolvedContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedContent")
            .field("content_length", &self.content_length)
            .field("content_type", &self.content_type)
            .field("content_disposition", &self.content_disposition)
            .finish()
    }
}

/// Maps authorized links to their stored bytes.
#[derive(Debug, Clone)]
pub struct ContentResolver {
    storage: Arc<dyn StorageProvider>,
}

impl ContentResolver {
    /// Creates a new content resolver.
    pub fn new(storage: Arc<dyn StorageProvider>) -> Self {
        Self { storage }
    }

    /// Open `object_path` for streaming.
    ///
    /// The MIME type always follows the stored `file_name`; `download_name`
    /// only changes the name offered in `Content-Disposition`. A missing
    /// object is `CONTENT_MISSING`: the record points at bytes that are gone.
    pub async fn fetch_and_stream(
        &self,
        object_path: &str,
        file_name: &str,
        download_name: &str,
        kind: DispositionKind,
    ) -> AppResult<ResolvedContent> {
        let meta = self
            .storage
            .metadata(object_path)
            .await
            .map_err(|e| missing_content(object_path, e))?;
        let stream = self
            .storage
            .read(object_path)
            .await
            .map_err(|e| missing_content(object_path, e))?;

        debug!(object_path, bytes = meta.size_bytes, "Opened content");
        Ok(ResolvedContent {
            stream,
            content_length: meta.size_bytes,
            content_type: content_type_for(file_name),
            content_disposition: content_disposition(kind, download_name),
        })
    }
}

fn missing_content(object_path: &str, err: AppError) -> AppError {
    if err.is(ErrorKind::NotFound) {
        error!(object_path, "Link record points at a missing object");
        AppError::with_source(
            ErrorKind::ContentMissing,
            "The shared file is no longer available",
            err,
        )
    } else {
        err
    }
}

//! Local filesystem storage provider.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::StreamExt;
use tokio::fs;
use tokio_util::io::ReaderStream;
use tracing::debug;

use linkshare_core::error::{AppError, ErrorKind};
use linkshare_core::result::AppResult;
use linkshare_core::traits::storage::{ByteStream, StorageObjectMeta, StorageProvider};

/// Local filesystem storage provider.
#[derive(Debug, Clone)]
pub struct LocalStorageProvider {
    /// Root directory for all stored objects.
    root: PathBuf,
}

impl LocalStorageProvider {
    /// Create a new local storage provider rooted at the given path.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Store,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Resolve an object path inside the root. Paths that would escape it
    /// are rejected.
    fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(AppError::validation(format!("Invalid object path: {path}")));
        }
        Ok(self.root.join(relative))
    }

    /// Ensure the parent directory of a path exists.
    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Store,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

/// Missing objects are `NotFound`; everything else is a store failure.
fn map_io(path: &str, action: &str) -> impl FnOnce(std::io::Error) -> AppError {
    let message = format!("Failed to {action} object: {path}");
    let missing = format!("Object not found: {path}");
    move |e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::with_source(ErrorKind::NotFound, missing, e)
        } else {
            AppError::with_source(ErrorKind::Store, message, e)
        }
    }
}

#[async_trait]
impl StorageProvider for LocalStorageProvider {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false))
    }

    async fn read(&self, path: &str) -> AppResult<ByteStream> {
        let full_path = self.resolve(path)?;
        let file = fs::File::open(&full_path)
            .await
            .map_err(map_io(path, "open"))?;

        debug!(path, "Opened object stream");
        let stream = ReaderStream::new(file);
        Ok(Box::pin(stream.map(|r| r.map(Bytes::from))))
    }

    async fn read_bytes(&self, path: &str) -> AppResult<Bytes> {
        let full_path = self.resolve(path)?;
        let data = fs::read(&full_path).await.map_err(map_io(path, "read"))?;
        Ok(Bytes::from(data))
    }

    async fn write(&self, path: &str, data: Bytes) -> AppResult<()> {
        let full_path = self.resolve(path)?;
        self.ensure_parent(&full_path).await?;

        fs::write(&full_path, &data)
            .await
            .map_err(map_io(path, "write"))?;

        debug!(path, bytes = data.len(), "Wrote object");
        Ok(())
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        let full_path = self.resolve(path)?;
        match fs::remove_file(&full_path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(map_io(path, "delete")(e)),
        }

        // Drop the now-empty `{owner}/{linkId}` directory; failures are harmless.
        if let Some(parent) = full_path.parent() {
            if parent != self.root {
                let _ = fs::remove_dir(parent).await;
            }
        }
        debug!(path, "Deleted object");
        Ok(())
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        let full_path = self.resolve(path)?;
        fs::try_exists(&full_path)
            .await
            .map_err(map_io(path, "stat"))
    }

    async fn metadata(&self, path: &str) -> AppResult<StorageObjectMeta> {
        let full_path = self.resolve(path)?;
        let meta = fs::metadata(&full_path)
            .await
            .map_err(map_io(path, "stat"))?;

        if !meta.is_file() {
            return Err(AppError::not_found(format!("Object not found: {path}")));
        }

        Ok(StorageObjectMeta {
            path: path.to_string(),
            size_bytes: meta.len(),
            last_modified: meta.modified().ok().map(chrono::DateTime::<chrono::Utc>::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn provider() -> (tempfile::TempDir, LocalStorageProvider) {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalStorageProvider::new(dir.path().to_str().unwrap())
            .await
            .unwrap();
        (dir, provider)
    }

    #[tokio::test]
    async fn test_write_read_delete() {
        let (_dir, provider) = provider().await;

        let data = Bytes::from("hello world");
        provider.write("owner/link/file.txt", data.clone()).await.unwrap();
        assert!(provider.exists("owner/link/file.txt").await.unwrap());

        let read_back = provider.read_bytes("owner/link/file.txt").await.unwrap();
        assert_eq!(read_back, data);

        let meta = provider.metadata("owner/link/file.txt").await.unwrap();
        assert_eq!(meta.size_bytes, 11);

        provider.delete("owner/link/file.txt").await.unwrap();
        assert!(!provider.exists("owner/link/file.txt").await.unwrap());
        // Deleting again is fine.
        provider.delete("owner/link/file.txt").await.unwrap();
    }

    #[tokio::test]
    async fn test_stream_yields_content() {
        let (_dir, provider) = provider().await;
        provider.write("o/l/a.bin", Bytes::from_static(b"abc")).await.unwrap();

        let mut stream = provider.read("o/l/a.bin").await.unwrap();
        let mut collected = Vec::new();
        while let Some(chunk) = stream.next().await {
            collected.extend_from_slice(&chunk.unwrap());
        }
        assert_eq!(collected, b"abc");
    }

    #[tokio::test]
    async fn test_missing_object_is_not_found() {
        let (_dir, provider) = provider().await;
        let err = provider.read("o/l/missing.txt").await.err().unwrap();
        assert!(err.is(ErrorKind::NotFound));
        let err = provider.metadata("o/l/missing.txt").await.unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_rejects_escaping_paths() {
        let (_dir, provider) = provider().await;
        let err = provider.read_bytes("../outside.txt").await.unwrap_err();
        assert!(err.is(ErrorKind::Validation));
    }
}

//! Local-disk blob storage for generated images.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::backend::BlobStore;
use crate::error::GenAiError;

/// Writes blobs under a directory served statically at `url_prefix`.
///
/// Files are named `<yyyymmdd_HHMMSS>_<uuid>.<ext>` so names never collide
/// and sort by creation time.
pub struct LocalBlobStore {
    root: PathBuf,
    url_prefix: String,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            url_prefix: url_prefix.into(),
        }
    }

    fn file_name(extension: &str) -> String {
        let stamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
        let extension = extension.trim_start_matches('.');
        format!("{stamp}_{}.{extension}", uuid::Uuid::new_v4())
    }

    /// File name behind a public URL, if the URL points into this store.
    fn name_for<'a>(&self, url: &'a str) -> Option<&'a str> {
        let name = url
            .strip_prefix(self.url_prefix.trim_end_matches('/'))?
            .strip_prefix('/')?;
        let flat = !name.is_empty() && !name.contains(['/', '\\']) && !name.starts_with('.');
        flat.then_some(name)
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn save(&self, bytes: &[u8], extension: &str) -> Result<String, GenAiError> {
        tokio::fs::create_dir_all(&self.root).await?;

        let name = Self::file_name(extension);
        tokio::fs::write(self.root.join(&name), bytes).await?;

        tracing::debug!(file = %name, size = bytes.len(), "Stored blob");
        Ok(format!("{}/{}", self.url_prefix.trim_end_matches('/'), name))
    }

    async fn delete(&self, url: &str) -> Result<bool, GenAiError> {
        let Some(name) = self.name_for(url) else {
            return Ok(false);
        };
        match tokio::fs::remove_file(self.root.join(name)).await {
            Ok(()) => {
                tracing::debug!(file = %name, "Removed blob");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn saves_bytes_and_returns_public_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path().join("uploads"), "/uploads/");

        let url = store.save(b"png-bytes", "png").await.unwrap();
        assert!(url.starts_with("/uploads/"));
        assert!(url.ends_with(".png"));

        let name = url.trim_start_matches("/uploads/");
        let written = std::fs::read(dir.path().join("uploads").join(name)).unwrap();
        assert_eq!(written, b"png-bytes");
    }

    #[tokio::test]
    async fn deletes_only_its_own_blobs() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path(), "/uploads");
        let url = store.save(b"png-bytes", "png").await.unwrap();

        let foreign = [
            "https://ui-avatars.com/api/?name=AI+Image",
            "/elsewhere/a.png",
            "/uploads/../secrets.txt",
            "/uploads/",
        ];
        for other in foreign {
            assert!(!store.delete(other).await.unwrap(), "{other}");
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);

        assert!(store.delete(&url).await.unwrap());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
        // Already gone.
        assert!(!store.delete(&url).await.unwrap());
    }

    #[tokio::test]
    async fn names_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path(), "/uploads");

        let a = store.save(b"a", ".jpg").await.unwrap();
        let b = store.save(b"b", "jpg").await.unwrap();
        assert_ne!(a, b);
        assert!(a.ends_with(".jpg") && !a.ends_with("..jpg"));
    }
}

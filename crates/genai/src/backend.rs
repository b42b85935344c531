//! Capability traits for the external backends.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::GenAiError;

/// Generative text backend: one prompt in, raw model text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> Result<String, GenAiError>;
}

/// Image bytes returned by a synchronous image backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl GeneratedImage {
    /// File extension for the image's MIME type (`png` when unknown).
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "png",
        }
    }
}

/// Synchronous generative image backend.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage, GenAiError>;
}

/// Task state as reported by the task-based image API.
///
/// Every field is optional on the wire; the provider fills gaps.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TaskSnapshot {
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Task-based image API: submit a prompt, then poll the task.
#[async_trait]
pub trait TaskBackend: Send + Sync {
    async fn submit(&self, prompt: &str) -> Result<TaskSnapshot, GenAiError>;
    async fn fetch(&self, task_id: &str) -> Result<TaskSnapshot, GenAiError>;
}

/// Durable blob storage.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under a fresh name with `extension`; returns the public URL.
    async fn save(&self, bytes: &[u8], extension: &str) -> Result<String, GenAiError>;

    /// Remove a blob previously returned by [`BlobStore::save`]. Returns
    /// `false` when `url` is not one of this store's blobs or is already gone.
    async fn delete(&self, url: &str) -> Result<bool, GenAiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_follows_mime_type() {
        let image = |mime: &str| GeneratedImage {
            bytes: vec![],
            mime_type: mime.to_string(),
        };
        assert_eq!(image("image/png").extension(), "png");
        assert_eq!(image("image/jpeg").extension(), "jpg");
        assert_eq!(image("image/webp").extension(), "webp");
        assert_eq!(image("application/octet-stream").extension(), "png");
    }

    #[test]
    fn snapshot_tolerates_sparse_payloads() {
        let snapshot: TaskSnapshot = serde_json::from_str(r#"{"task_id": "t-9"}"#).unwrap();
        assert_eq!(snapshot.task_id.as_deref(), Some("t-9"));
        assert_eq!(snapshot.status, None);

        let full: TaskSnapshot = serde_json::from_str(
            r#"{"task_id":"t","status":"completed","image_url":"https://x/y.png","progress":100}"#,
        )
        .unwrap();
        assert_eq!(full.progress, Some(100.0));
    }
}

//! Image generation result types shared by every provider.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle of a generation task, also stored on comic images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl GenerationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Parse a stored or remote status string.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            other => Err(CoreError::Validation(format!(
                "Invalid status '{other}'. Must be one of: pending, processing, completed, failed"
            ))),
        }
    }
}

/// What a provider reports for `generate` or `check_status`.
///
/// Serialized as-is in the `/comics/generate` and `/comics/status` responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationResult {
    pub task_id: String,
    pub status: GenerationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The prompt actually dispatched (after character injection and style
    /// suffix). Empty for status checks.
    #[serde(skip)]
    pub prompt: String,
}

impl GenerationResult {
    /// A final image URL, if this result carries one.
    pub fn final_image_url(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|url| !url.is_empty())
    }

    pub fn is_pending(&self) -> bool {
        self.status == GenerationStatus::Pending
    }
}

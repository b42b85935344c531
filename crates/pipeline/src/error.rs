use comicflow_core::error::CoreError;

/// Hard failures from an image provider.
///
/// Degraded backends are not errors: providers fall back to placeholder
/// generation instead. Only an explicit remote refusal of a real task
/// surfaces here.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Image API rejected task {task_id} ({status})")]
    TaskRejected { task_id: String, status: u16 },
}

/// Error type for pipeline operations.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

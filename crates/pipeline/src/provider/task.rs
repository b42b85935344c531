use std::sync::Arc;

use async_trait::async_trait;
use comicflow_core::consistency::CharacterSheet;
use comicflow_core::generation::{GenerationResult, GenerationStatus};
use comicflow_core::mock::{is_mock_task, mock_pending, mock_status, MockStatusMode};
use comicflow_core::panel::task_storyboard_prompt;
use comicflow_genai::{GenAiError, TaskBackend, TaskSnapshot};

use super::{dispatch_prompt, ImageProvider};
use crate::error::ProviderError;

/// Style suffix appended to every task-based prompt.
pub const TASK_STYLE_SUFFIX: &str = ", high detail, clean line art";

/// Reported while a real task's status cannot be fetched.
const STATUS_UNAVAILABLE: &str = "Task status temporarily unavailable";

/// Provider backed by a task-based image API.
///
/// `generate` returns a `pending` task; `check_status` polls it. Without a
/// backend, or when submission fails, tasks are mock tasks that resolve on
/// the first status check.
pub struct TaskProvider {
    backend: Option<Arc<dyn TaskBackend>>,
    mock_mode: MockStatusMode,
}

impl TaskProvider {
    pub fn new(backend: Option<Arc<dyn TaskBackend>>, mock_mode: MockStatusMode) -> Self {
        Self { backend, mock_mode }
    }
}

#[async_trait]
impl ImageProvider for TaskProvider {
    fn panel_prompt(&self, description: &str, camera: &str, mood: &str) -> String {
        task_storyboard_prompt(description, camera, mood)
    }

    async fn generate(
        &self,
        prompt: &str,
        character: Option<&CharacterSheet<'_>>,
    ) -> GenerationResult {
        let prompt = dispatch_prompt(prompt, character, TASK_STYLE_SUFFIX);

        let Some(backend) = &self.backend else {
            tracing::warn!(reason = "no_credential", "Task API not configured, using mock generation");
            return mock_pending(prompt);
        };

        match backend.submit(&prompt).await {
            Ok(snapshot) => match snapshot.task_id.clone().filter(|id| !id.is_empty()) {
                Some(task_id) => {
                    tracing::info!(task_id = %task_id, "Task submitted");
                    from_snapshot(snapshot, task_id, GenerationStatus::Pending, prompt)
                }
                None => {
                    tracing::warn!(reason = "missing_task_id", "Task API reply unusable, using mock generation");
                    mock_pending(prompt)
                }
            },
            Err(e) => {
                tracing::warn!(reason = "submit_failed", error = %e, "Task submission failed, using mock generation");
                mock_pending(prompt)
            }
        }
    }

    async fn check_status(&self, task_id: &str) -> Result<GenerationResult, ProviderError> {
        let backend = match &self.backend {
            Some(backend) if !is_mock_task(task_id) => backend,
            _ => return Ok(mock_status(task_id, self.mock_mode)),
        };

        match backend.fetch(task_id).await {
            Ok(snapshot) => Ok(from_snapshot(
                snapshot,
                task_id.to_string(),
                GenerationStatus::Processing,
                String::new(),
            )),
            Err(GenAiError::Api { status, body }) => {
                tracing::error!(task_id, status, body = %body, "Task API rejected status check");
                Err(ProviderError::TaskRejected {
                    task_id: task_id.to_string(),
                    status,
                })
            }
            Err(e) => {
                tracing::warn!(task_id, error = %e, "Task status check failed");
                Ok(GenerationResult {
                    task_id: task_id.to_string(),
                    status: GenerationStatus::Processing,
                    image_url: None,
                    progress: None,
                    message: Some(STATUS_UNAVAILABLE.to_string()),
                    prompt: String::new(),
                })
            }
        }
    }
}

/// Map a remote snapshot onto a result, filling gaps.
fn from_snapshot(
    snapshot: TaskSnapshot,
    task_id: String,
    default_status: GenerationStatus,
    prompt: String,
) -> GenerationResult {
    let status = snapshot
        .status
        .as_deref()
        .and_then(|s| GenerationStatus::parse(&s.to_ascii_lowercase()).ok())
        .unwrap_or(default_status);

    GenerationResult {
        task_id,
        status,
        image_url: snapshot.image_url.filter(|url| !url.is_empty()),
        progress: snapshot.progress.map(|p| p.clamp(0.0, 100.0) as u8),
        message: snapshot.message,
        prompt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::sync::Mutex;

    /// Scripted task API that records submitted prompts.
    #[derive(Default)]
    struct FakeTaskApi {
        submitted: Mutex<Vec<String>>,
        reject_submit: bool,
        reject_fetch: Option<u16>,
        fetch_unreachable: bool,
    }

    #[async_trait]
    impl TaskBackend for FakeTaskApi {
        async fn submit(&self, prompt: &str) -> Result<TaskSnapshot, GenAiError> {
            self.submitted.lock().unwrap().push(prompt.to_string());
            if self.reject_submit {
                return Err(GenAiError::Api {
                    status: 401,
                    body: "bad key".into(),
                });
            }
            Ok(TaskSnapshot {
                task_id: Some("task-42".into()),
                status: Some("pending".into()),
                ..Default::default()
            })
        }

        async fn fetch(&self, task_id: &str) -> Result<TaskSnapshot, GenAiError> {
            if let Some(status) = self.reject_fetch {
                return Err(GenAiError::Api {
                    status,
                    body: "unknown task".into(),
                });
            }
            if self.fetch_unreachable {
                return Err(GenAiError::MissingPayload("task body".into()));
            }
            Ok(TaskSnapshot {
                task_id: Some(task_id.to_string()),
                status: Some("COMPLETED".into()),
                image_url: Some(format!("https://cdn.example/{task_id}.png")),
                progress: Some(100.0),
                message: None,
            })
        }
    }

    fn provider(api: FakeTaskApi) -> (TaskProvider, Arc<FakeTaskApi>) {
        let api = Arc::new(api);
        (
            TaskProvider::new(Some(api.clone()), MockStatusMode::Reshuffle),
            api,
        )
    }

    #[tokio::test]
    async fn submits_prompt_with_suffix_and_returns_pending() {
        let (provider, api) = provider(FakeTaskApi::default());

        let result = provider.generate("a lighthouse", None).await;
        assert_eq!(result.status, GenerationStatus::Pending);
        assert_eq!(result.task_id, "task-42");
        assert_eq!(result.prompt, format!("a lighthouse{TASK_STYLE_SUFFIX}"));
        assert_eq!(*api.submitted.lock().unwrap(), vec![result.prompt.clone()]);
    }

    #[tokio::test]
    async fn polls_real_task_to_completion() {
        let (provider, _) = provider(FakeTaskApi::default());

        let status = provider.check_status("task-42").await.unwrap();
        assert_eq!(status.status, GenerationStatus::Completed);
        assert_eq!(status.final_image_url(), Some("https://cdn.example/task-42.png"));
        assert_eq!(status.progress, Some(100));
    }

    #[tokio::test]
    async fn missing_backend_degrades_to_mock() {
        let provider = TaskProvider::new(None, MockStatusMode::Reshuffle);

        let result = provider.generate("", None).await;
        assert!(result.is_pending());
        assert!(is_mock_task(&result.task_id));

        let resolved = provider.check_status(&result.task_id).await.unwrap();
        assert_eq!(resolved.status, GenerationStatus::Completed);
        assert!(resolved.final_image_url().is_some());
    }

    #[tokio::test]
    async fn rejected_submission_degrades_to_mock() {
        let (provider, _) = provider(FakeTaskApi {
            reject_submit: true,
            ..Default::default()
        });

        let result = provider.generate("a lighthouse", None).await;
        assert!(is_mock_task(&result.task_id));
        assert!(result.is_pending());
    }

    #[tokio::test]
    async fn mock_ids_never_reach_the_backend() {
        let (provider, _) = provider(FakeTaskApi {
            reject_fetch: Some(404),
            ..Default::default()
        });

        let status = provider.check_status("mock-123").await.unwrap();
        assert_eq!(status.status, GenerationStatus::Completed);
    }

    #[tokio::test]
    async fn rejected_real_task_is_a_hard_failure() {
        let (provider, _) = provider(FakeTaskApi {
            reject_fetch: Some(404),
            ..Default::default()
        });

        assert_matches!(
            provider.check_status("task-404").await,
            Err(ProviderError::TaskRejected { status: 404, .. })
        );
    }

    #[tokio::test]
    async fn unreachable_status_reports_processing() {
        let (provider, _) = provider(FakeTaskApi {
            fetch_unreachable: true,
            ..Default::default()
        });

        let status = provider.check_status("task-42").await.unwrap();
        assert_eq!(status.status, GenerationStatus::Processing);
        assert!(status.final_image_url().is_none());
    }

    #[test]
    fn batch_prompt_carries_directive() {
        let provider = TaskProvider::new(None, MockStatusMode::Stable);
        assert_eq!(
            provider.panel_prompt("a duel", "Wide Shot", "tense"),
            "a duel, Wide Shot, tense, anime style, --ar 16:9"
        );
    }
}

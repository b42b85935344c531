//! Placeholder generation used whenever no real image backend answers.
//!
//! Mock results have the same shape as real ones: a task id (prefixed with
//! [`MOCK_TASK_PREFIX`]) and a placeholder image URL rendered by a public
//! avatar service in a random background color. Nothing here can fail.

use rand::Rng;
use uuid::Uuid;

use crate::error::CoreError;
use crate::generation::{GenerationResult, GenerationStatus};

/// Marks a task id as produced by the mock fallback.
pub const MOCK_TASK_PREFIX: &str = "mock-";

/// Message attached to a mock task that still needs a status check.
pub const MOCK_PENDING_MESSAGE: &str = "Mock generation started";

/// How `check_status` on a mock task picks its placeholder color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MockStatusMode {
    /// A new random color on every check, so repeated checks of the same
    /// task return different URLs.
    #[default]
    Reshuffle,
    /// Color derived from the task id; repeated checks agree.
    Stable,
}

impl MockStatusMode {
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "reshuffle" => Ok(Self::Reshuffle),
            "stable" => Ok(Self::Stable),
            other => Err(CoreError::Validation(format!(
                "Invalid mock status mode '{other}'. Must be one of: reshuffle, stable"
            ))),
        }
    }
}

/// Fresh mock task id, e.g. `mock-6f1c...`.
pub fn new_mock_task_id() -> String {
    format!("{MOCK_TASK_PREFIX}{}", Uuid::new_v4())
}

pub fn is_mock_task(task_id: &str) -> bool {
    task_id.starts_with(MOCK_TASK_PREFIX)
}

/// Placeholder image URL with the given 6-digit hex background.
pub fn placeholder_url(background: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name=AI+Image&background={background}&color=fff&size=512&font-size=0.33"
    )
}

pub fn random_color() -> String {
    format!("{:06x}", rand::rng().random_range(0..=0xFF_FFFFu32))
}

/// Color derived from the task id (FNV-1a, low 24 bits).
pub fn stable_color(task_id: &str) -> String {
    let hash = task_id
        .bytes()
        .fold(0x811c_9dc5u32, |h, b| (h ^ u32::from(b)).wrapping_mul(0x0100_0193));
    format!("{:06x}", hash & 0xFF_FFFF)
}

/// Mock task awaiting a status check (task-based provider).
pub fn mock_pending(prompt: String) -> GenerationResult {
    GenerationResult {
        task_id: new_mock_task_id(),
        status: GenerationStatus::Pending,
        image_url: None,
        progress: None,
        message: Some(MOCK_PENDING_MESSAGE.to_string()),
        prompt,
    }
}

/// Mock task that is already finished (synchronous provider).
pub fn mock_completed(prompt: String) -> GenerationResult {
    GenerationResult {
        task_id: new_mock_task_id(),
        status: GenerationStatus::Completed,
        image_url: Some(placeholder_url(&random_color())),
        progress: Some(100),
        message: None,
        prompt,
    }
}

/// Status of a mock task: always completed with a placeholder image.
pub fn mock_status(task_id: &str, mode: MockStatusMode) -> GenerationResult {
    let color = match mode {
        MockStatusMode::Reshuffle => random_color(),
        MockStatusMode::Stable => stable_color(task_id),
    };
    GenerationResult {
        task_id: task_id.to_string(),
        status: GenerationStatus::Completed,
        image_url: Some(placeholder_url(&color)),
        progress: Some(100),
        message: None,
        prompt: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_task_ids_are_prefixed_and_unique() {
        let a = new_mock_task_id();
        let b = new_mock_task_id();
        assert!(is_mock_task(&a));
        assert_ne!(a, b);
        assert!(!is_mock_task("b8e1-real-task"));
    }

    #[test]
    fn random_color_is_six_hex_digits() {
        for _ in 0..50 {
            let color = random_color();
            assert_eq!(color.len(), 6);
            assert!(color.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn pending_mock_has_no_image_yet() {
        let result = mock_pending("".into());
        assert_eq!(result.status, GenerationStatus::Pending);
        assert!(result.image_url.is_none());
        assert!(is_mock_task(&result.task_id));
    }

    #[test]
    fn completed_mock_never_lacks_an_image() {
        for prompt in ["", "   ", "<script>alert(1)</script>", "\u{0}\u{1F600}"] {
            let result = mock_completed(prompt.to_string());
            assert_eq!(result.status, GenerationStatus::Completed);
            assert!(result.final_image_url().is_some());
        }
    }

    #[test]
    fn stable_mode_is_idempotent() {
        let id = new_mock_task_id();
        let first = mock_status(&id, MockStatusMode::Stable);
        let second = mock_status(&id, MockStatusMode::Stable);
        assert_eq!(first.image_url, second.image_url);
        assert_eq!(first.task_id, id);
    }

    #[test]
    fn reshuffle_mode_changes_color_between_checks() {
        // Reference behavior: each check re-rolls the placeholder color.
        // Two colors out of 2^24 collide rarely; three checks all agreeing
        // would mean the color is not being re-rolled.
        let id = new_mock_task_id();
        let urls: Vec<_> = (0..3)
            .map(|_| mock_status(&id, MockStatusMode::Reshuffle).image_url)
            .collect();
        assert!(urls[0] != urls[1] || urls[1] != urls[2]);
        assert!(urls.iter().all(|u| u.is_some()));
    }

    #[test]
    fn parses_mode_names() {
        assert_eq!(MockStatusMode::parse("Stable").unwrap(), MockStatusMode::Stable);
        assert_eq!(MockStatusMode::parse("reshuffle").unwrap(), MockStatusMode::Reshuffle);
        assert!(MockStatusMode::parse("sometimes").is_err());
    }
}

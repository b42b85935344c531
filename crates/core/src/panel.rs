//! Canvas panel defaults and storyboard prompt composition.

/// Width of a panel materialized from a storyboard (16:9).
pub const STORYBOARD_PANEL_WIDTH: i32 = 400;

/// Height of a panel materialized from a storyboard (16:9).
pub const STORYBOARD_PANEL_HEIGHT: i32 = 225;

/// Panels start at the canvas origin; users drag them into place.
pub const DEFAULT_POSITION: (i32, i32) = (0, 0);

/// Appended to storyboard prompts on the task-based provider only. The
/// synchronous backend rejects aspect-ratio flags.
pub const TASK_PANEL_DIRECTIVE: &str = "anime style, --ar 16:9";

/// Message returned with a finished batch.
pub const BATCH_COMPLETE_MESSAGE: &str = "Batch generation complete";

/// `description, camera, mood`, skipping blank parts.
pub fn storyboard_prompt(description: &str, camera: &str, mood: &str) -> String {
    [description, camera, mood]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Storyboard prompt with the task-based provider's directive.
pub fn task_storyboard_prompt(description: &str, camera: &str, mood: &str) -> String {
    let base = storyboard_prompt(description, camera, mood);
    if base.is_empty() {
        return TASK_PANEL_DIRECTIVE.to_string();
    }
    format!("{base}, {TASK_PANEL_DIRECTIVE}")
}

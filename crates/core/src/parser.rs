//! Extraction of scene lists from free-form model output.
//!
//! Models wrap the requested JSON array in prose or fenced code blocks more
//! often than not, so [`parse_scenes`] tries progressively looser readings
//! and reports failure as `None` rather than an error.

use std::sync::LazyLock;

use regex::Regex;

use crate::scene::SceneDescriptor;

/// First `[` through last `]`, across newlines.
static BRACKETED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[\s\S]*\]").expect("valid regex"));

static LEADING_JSON_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```json\s*").expect("valid regex"));

static LEADING_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```\s*").expect("valid regex"));

static TRAILING_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*```$").expect("valid regex"));

/// Parse model output into an ordered list of scenes.
///
/// Tried in order, first success wins:
///
/// 1. the whole text as a JSON array;
/// 2. the greedy `[...]` substring;
/// 3. the text with a leading (optionally `json`-tagged) fence and a
///    trailing fence removed.
///
/// Returns `None` when all three fail.
pub fn parse_scenes(raw: &str) -> Option<Vec<SceneDescriptor>> {
    if let Ok(scenes) = serde_json::from_str::<Vec<SceneDescriptor>>(raw) {
        return Some(scenes);
    }

    if let Some(found) = BRACKETED_RE.find(raw) {
        if let Ok(scenes) = serde_json::from_str::<Vec<SceneDescriptor>>(found.as_str()) {
            return Some(scenes);
        }
    }

    let trimmed = raw.trim();
    let unfenced = LEADING_JSON_FENCE_RE.replace(trimmed, "");
    let unfenced = LEADING_FENCE_RE.replace(&unfenced, "");
    let unfenced = TRAILING_FENCE_RE.replace(&unfenced, "");
    serde_json::from_str::<Vec<SceneDescriptor>>(&unfenced).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARRAY: &str = r#"[
  {"sequence": 1, "description": "A girl at the gate", "camera": "Wide Shot", "dialogue": "none", "mood": "calm"},
  {"sequence": 2, "description": "She opens the letter", "camera": "Close Up", "dialogue": "What?", "mood": "shocked"}
]"#;

    fn expected() -> Vec<SceneDescriptor> {
        serde_json::from_str(ARRAY).unwrap()
    }

    #[test]
    fn parses_bare_array() {
        assert_eq!(parse_scenes(ARRAY), Some(expected()));
    }

    #[test]
    fn parses_json_fenced_block() {
        let raw = format!("```json\n{ARRAY}\n```");
        assert_eq!(parse_scenes(&raw), Some(expected()));
    }

    #[test]
    fn parses_untagged_fence() {
        let raw = format!("```\n{ARRAY}\n```");
        assert_eq!(parse_scenes(&raw), Some(expected()));
    }

    #[test]
    fn parses_array_embedded_in_prose() {
        let raw = format!("Here is your storyboard:\n{ARRAY}\nEnjoy!");
        assert_eq!(parse_scenes(&raw), Some(expected()));
    }

    #[test]
    fn empty_array_is_a_successful_parse() {
        assert_eq!(parse_scenes("[]"), Some(Vec::new()));
    }

    #[test]
    fn object_instead_of_array_fails() {
        assert_eq!(parse_scenes(r#"{"sequence": 1}"#), None);
    }

    #[test]
    fn garbage_returns_none() {
        assert_eq!(parse_scenes("I cannot help with that."), None);
        assert_eq!(parse_scenes(""), None);
        assert_eq!(parse_scenes("[not json at all]"), None);
    }

    #[test]
    fn truncated_array_returns_none() {
        assert_eq!(parse_scenes(r#"[{"sequence": 1, "description": "cut off"#), None);
    }
}

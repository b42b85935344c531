//! Scene descriptors: the transient output of story analysis.
//!
//! A scene becomes a persisted storyboard once saved. Text fields are
//! lenient on input (missing or `null` becomes an empty string) because the
//! generative text backend does not always honor the requested shape.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;

/// One narrative beat produced by the story analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneDescriptor {
    /// 1-based position in the story.
    #[serde(default, deserialize_with = "lenient_sequence")]
    pub sequence: i32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub camera: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dialogue: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub mood: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `3`, `3.0`, `"3"` or `null` (as 0) for the sequence field.
fn lenient_sequence<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let sequence = match value {
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(serde_json::Value::String(s)) => s.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    };
    Ok(i32::try_from(sequence).unwrap_or(0))
}

/// Validate a scene submitted for persistence.
///
/// The sequence must be positive and the description non-blank; camera,
/// dialogue and mood are optional.
pub fn validate_scene(scene: &SceneDescriptor) -> Result<(), CoreError> {
    if scene.sequence < 1 {
        return Err(CoreError::Validation(format!(
            "scene sequence must be >= 1, got {}",
            scene.sequence
        )));
    }
    if scene.description.trim().is_empty() {
        return Err(CoreError::Validation(format!(
            "scene {} is missing a description",
            scene.sequence
        )));
    }
    Ok(())
}

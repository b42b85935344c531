//! Character consistency: folding a character template into a prompt.

use serde_json::{Map, Value};

/// Read-only view of the parts of a character template that affect prompts.
#[derive(Debug, Clone, Copy)]
pub struct CharacterSheet<'a> {
    pub description: Option<&'a str>,
    /// Trait name to trait value, in stored order.
    pub features: Option<&'a Map<String, Value>>,
}

/// Append a character's traits and description to `prompt`.
///
/// Each non-empty trait becomes `key:value` (in stored key order), followed
/// by the free-text description if present. The clauses are joined with
/// `", "` and appended after a comma. Without a sheet, or when the sheet
/// contributes nothing, the prompt is returned unchanged.
pub fn inject_character(prompt: &str, sheet: Option<&CharacterSheet<'_>>) -> String {
    let Some(sheet) = sheet else {
        return prompt.to_string();
    };

    let mut clauses: Vec<String> = sheet
        .features
        .into_iter()
        .flat_map(|features| features.iter())
        .filter_map(|(key, value)| trait_text(value).map(|text| format!("{key}:{text}")))
        .collect();

    if let Some(description) = sheet.description.filter(|d| !d.is_empty()) {
        clauses.push(description.to_string());
    }

    if clauses.is_empty() {
        return prompt.to_string();
    }
    format!("{prompt}, {}", clauses.join(", "))
}

/// Render a trait value, or `None` when it is empty (null, `""`, `false`,
/// `0`, `[]` or `{}`).
fn trait_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Array(a) if a.is_empty() => None,
        Value::Object(o) if o.is_empty() => None,
        other => Some(other.to_string()),
    }
}

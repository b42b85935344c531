//! Story-to-scene conversion rules shared by both analysis paths.
//!
//! The model path builds [`analysis_prompt`] and cleans the parsed reply with
//! [`normalize_model_scenes`]; the heuristic path ([`heuristic_scenes`])
//! splits the story into sentences and decorates each one from fixed tables.
//! Both paths end every description with [`STYLE_QUALIFIER`].

use std::sync::LazyLock;

use regex::Regex;

use crate::scene::SceneDescriptor;

// ---------------------------------------------------------------------------
// Scene count bounds
// ---------------------------------------------------------------------------

/// Fewest scenes an analysis may produce.
pub const MIN_SCENES: usize = 2;

/// Most scenes an analysis may produce.
pub const MAX_SCENES: usize = 8;

/// Fragments must be longer than this (in characters) to become a scene.
pub const MIN_FRAGMENT_CHARS: usize = 5;

/// Input prefix used when no sentence survives filtering.
pub const FALLBACK_EXCERPT_CHARS: usize = 100;

// ---------------------------------------------------------------------------
// Fixed text
// ---------------------------------------------------------------------------

/// Appended to every scene description.
pub const STYLE_QUALIFIER: &str = ", comic style, high quality, detailed";

/// Description used to pad a story that yields a single fragment.
pub const CONTINUATION_DESCRIPTION: &str = "The story continues...";

/// Dialogue for the opening scene of a heuristic analysis.
pub const NARRATOR_OPENING: &str = "Narrator: the story begins...";

/// Dialogue marker for fragments that look like speech.
pub const DIALOGUE_MARKER: &str = "(character dialogue)";

/// Dialogue marker for fragments without speech.
pub const NO_DIALOGUE: &str = "none";

/// Shot types, cycled by scene index.
pub const CAMERA_TYPES: [&str; 8] = [
    "全景 (Wide Shot)",
    "中景 (Medium Shot)",
    "特写 (Close Up)",
    "仰拍 (Low Angle)",
    "俯拍 (High Angle)",
    "远景 (Long Shot)",
    "过肩镜头 (Over the Shoulder)",
    "主观镜头 (POV Shot)",
];

/// Moods used when no keyword matches, cycled by scene index.
pub const DEFAULT_MOODS: [&str; 8] = [
    "anticipation",
    "tense",
    "shocked",
    "intense",
    "heroic",
    "relieved",
    "moved",
    "mysterious",
];

/// Keyword to mood table. Scanned top to bottom; the first keyword found in
/// the fragment decides the mood, so the order here is part of the output.
/// English keywords are matched against the lowercased fragment.
pub const MOOD_KEYWORDS: &[(&str, &str)] = &[
    ("开心", "joyful"),
    ("快乐", "joyful"),
    ("笑", "joyful"),
    ("高兴", "joyful"),
    ("伤心", "sad"),
    ("哭", "sad"),
    ("难过", "sad"),
    ("痛苦", "sad"),
    ("害怕", "fearful"),
    ("恐怖", "fearful"),
    ("可怕", "fearful"),
    ("紧张", "tense"),
    ("危险", "tense"),
    ("战斗", "tense"),
    ("打", "tense"),
    ("神秘", "mysterious"),
    ("奇怪", "mysterious"),
    ("秘密", "mysterious"),
    ("爱", "romantic"),
    ("喜欢", "romantic"),
    ("心", "romantic"),
    ("愤怒", "intense"),
    ("怒", "intense"),
    ("生气", "intense"),
    ("happy", "joyful"),
    ("laugh", "joyful"),
    ("smile", "joyful"),
    ("sad", "sad"),
    ("cry", "sad"),
    ("tears", "sad"),
    ("afraid", "fearful"),
    ("scared", "fearful"),
    ("terrif", "fearful"),
    ("danger", "tense"),
    ("fight", "tense"),
    ("battle", "tense"),
    ("mysterious", "mysterious"),
    ("strange", "mysterious"),
    ("secret", "mysterious"),
    ("love", "romantic"),
    ("heart", "romantic"),
    ("angry", "intense"),
    ("rage", "intense"),
    ("furious", "intense"),
];

/// Substrings that mark a fragment as containing speech.
const SPEECH_MARKERS: &[&str] = &[
    "说", "道", "\"", "“", "”", "「", "」", " said", " says", " asked", " shouted", " replied",
];

/// Sentence terminators, East Asian and Western, plus newlines.
static SENTENCE_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[。！？.!?\n]+").expect("valid regex"));

// ---------------------------------------------------------------------------
// Model path
// ---------------------------------------------------------------------------

/// Build the instruction prompt sent to the generative text backend.
pub fn analysis_prompt(story_text: &str) -> String {
    format!(
        r#"You are a professional comic storyboard artist. Analyze the story below and split it into storyboard panels suitable for a comic.

Story:
{story_text}

Return the storyboard as a JSON array in exactly this shape (return the array only, no other text):
[
  {{
    "sequence": 1,
    "description": "A detailed description of the panel: setting, character actions and expressions, written for an image generator",
    "camera": "Shot type, e.g. Wide Shot, Medium Shot, Close Up, Low Angle, High Angle",
    "dialogue": "Dialogue or narration in this panel, or 'none'",
    "mood": "Emotional tone of the panel, e.g. tense, joyful, sad, mysterious"
  }}
]

Requirements:
1. Split the story sensibly; 3-8 panels is usually right
2. Each description must be specific enough for an image generator
3. Vary the shot types for visual rhythm
4. Keep the story coherent and well paced

Return only the JSON array, without any explanation."#
    )
}

/// Clean up scenes parsed from model output.
///
/// Drops scenes with a blank description, keeps at most [`MAX_SCENES`] in
/// the order returned, renumbers them `1..=N` and appends the style
/// qualifier. Returns `None` when fewer than [`MIN_SCENES`] remain so the
/// caller can fall back to the heuristic path.
pub fn normalize_model_scenes(scenes: Vec<SceneDescriptor>) -> Option<Vec<SceneDescriptor>> {
    let normalized: Vec<SceneDescriptor> = scenes
        .into_iter()
        .filter(|s| !s.description.trim().is_empty())
        .take(MAX_SCENES)
        .enumerate()
        .map(|(i, s)| SceneDescriptor {
            sequence: (i + 1) as i32,
            description: format!("{}{STYLE_QUALIFIER}", s.description.trim()),
            ..s
        })
        .collect();

    if normalized.len() < MIN_SCENES {
        return None;
    }
    Some(normalized)
}

// ---------------------------------------------------------------------------
// Heuristic path
// ---------------------------------------------------------------------------

/// Split a story into scenes without any model.
///
/// Always returns between [`MIN_SCENES`] and [`MAX_SCENES`] scenes for
/// non-empty input.
pub fn heuristic_scenes(story_text: &str) -> Vec<SceneDescriptor> {
    let mut fragments: Vec<String> = SENTENCE_SPLIT_RE
        .split(story_text)
        .map(str::trim)
        .filter(|s| s.chars().count() > MIN_FRAGMENT_CHARS)
        .map(str::to_string)
        .collect();

    if fragments.is_empty() {
        fragments.push(story_text.chars().take(FALLBACK_EXCERPT_CHARS).collect());
    }

    let count = fragments.len().clamp(MIN_SCENES, MAX_SCENES);

    (0..count)
        .map(|i| {
            let description = fragments
                .get(i)
                .map(String::as_str)
                .unwrap_or(CONTINUATION_DESCRIPTION);

            let dialogue = if i == 0 {
                NARRATOR_OPENING
            } else if contains_speech(description) {
                DIALOGUE_MARKER
            } else {
                NO_DIALOGUE
            };

            SceneDescriptor {
                sequence: (i + 1) as i32,
                description: format!("{description}{STYLE_QUALIFIER}"),
                camera: CAMERA_TYPES[i % CAMERA_TYPES.len()].to_string(),
                dialogue: dialogue.to_string(),
                mood: detect_mood(description, i).to_string(),
            }
        })
        .collect()
}

/// First matching keyword's mood, else the default mood for this index.
pub fn detect_mood(fragment: &str, index: usize) -> &'static str {
    let lowered = fragment.to_lowercase();
    MOOD_KEYWORDS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, mood)| *mood)
        .unwrap_or(DEFAULT_MOODS[index % DEFAULT_MOODS.len()])
}

fn contains_speech(fragment: &str) -> bool {
    let lowered = fragment.to_lowercase();
    SPEECH_MARKERS.iter().any(|m| lowered.contains(m))
}

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use comicflow_core::types::DbId;
use comicflow_db::models::character_template::CharacterTemplate;
use comicflow_db::models::comic_image::{ComicImage, CreateComicImage};
use comicflow_db::models::storyboard::{CreateStoryboard, Storyboard};

use super::ComicStore;

/// In-process [`ComicStore`].
///
/// Writes are all-or-nothing like the PostgreSQL store. With the
/// `test-util` feature it also counts every persistence call other than the
/// access check, and can be told to fail the next panel commit.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    next_id: DbId,
    access: HashSet<(DbId, DbId)>,
    storyboards: Vec<Storyboard>,
    images: Vec<ComicImage>,
    templates: Vec<CharacterTemplate>,
    fail_next_commit: bool,
    #[cfg_attr(not(any(test, feature = "test-util")), allow(dead_code))]
    data_calls: usize,
}

impl State {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Let `user_id` access `project_id`.
    pub fn grant_access(&self, project_id: DbId, user_id: DbId) {
        self.lock().access.insert((project_id, user_id));
    }

    /// Add a character template and return its id.
    pub fn add_template(
        &self,
        name: &str,
        description: Option<&str>,
        features: Option<serde_json::Value>,
    ) -> DbId {
        let mut state = self.lock();
        let id = state.next_id();
        state.templates.push(CharacterTemplate {
            id,
            name: name.to_string(),
            description: description.map(str::to_string),
            features,
            reference_images: None,
            owner_id: 0,
            created_at: Utc::now(),
        });
        id
    }

    /// Make the next `commit_panels` fail with a database error.
    #[cfg(any(test, feature = "test-util"))]
    pub fn fail_next_commit(&self) {
        self.lock().fail_next_commit = true;
    }

    /// Persistence calls made so far, not counting access checks.
    #[cfg(any(test, feature = "test-util"))]
    pub fn data_calls(&self) -> usize {
        self.lock().data_calls
    }

    /// Snapshot of a project's storyboards, ordered by sequence.
    pub fn storyboards(&self, project_id: DbId) -> Vec<Storyboard> {
        self.lock().sorted_storyboards(project_id)
    }

    /// Snapshot of a project's panels, in insertion order.
    pub fn images(&self, project_id: DbId) -> Vec<ComicImage> {
        self.lock()
            .images
            .iter()
            .filter(|image| image.project_id == project_id)
            .cloned()
            .collect()
    }
}

impl State {
    fn sorted_storyboards(&self, project_id: DbId) -> Vec<Storyboard> {
        let mut rows: Vec<Storyboard> = self
            .storyboards
            .iter()
            .filter(|sb| sb.project_id == project_id)
            .cloned()
            .map(|mut sb| {
                sb.image_url = sb
                    .comic_image_id
                    .and_then(|id| self.images.iter().find(|image| image.id == id))
                    .and_then(|image| image.image_url.clone());
                sb
            })
            .collect();
        rows.sort_by_key(|sb| (sb.sequence, sb.id));
        rows
    }
}

#[async_trait]
impl ComicStore for MemoryStore {
    async fn has_access(&self, project_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        Ok(self.lock().access.contains(&(project_id, user_id)))
    }

    async fn list_storyboards(&self, project_id: DbId) -> Result<Vec<Storyboard>, sqlx::Error> {
        let mut state = self.lock();
        state.data_calls += 1;
        Ok(state.sorted_storyboards(project_id))
    }

    async fn replace_storyboards(
        &self,
        project_id: DbId,
        scenes: &[CreateStoryboard],
    ) -> Result<Vec<Storyboard>, sqlx::Error> {
        let mut state = self.lock();
        state.data_calls += 1;
        state.storyboards.retain(|sb| sb.project_id != project_id);

        let mut saved = Vec::with_capacity(scenes.len());
        for scene in scenes {
            let row = Storyboard {
                id: state.next_id(),
                project_id,
                sequence: scene.sequence,
                description: scene.description.clone(),
                camera: scene.camera.clone(),
                dialogue: scene.dialogue.clone(),
                mood: scene.mood.clone(),
                comic_image_id: None,
                image_url: None,
                created_at: Utc::now(),
            };
            state.storyboards.push(row.clone());
            saved.push(row);
        }
        Ok(saved)
    }

    async fn character_template(&self, id: DbId) -> Result<Option<CharacterTemplate>, sqlx::Error> {
        let mut state = self.lock();
        state.data_calls += 1;
        Ok(state.templates.iter().find(|t| t.id == id).cloned())
    }

    async fn commit_panels(
        &self,
        panels: &[(DbId, CreateComicImage)],
    ) -> Result<Vec<ComicImage>, sqlx::Error> {
        let mut state = self.lock();
        state.data_calls += 1;
        if std::mem::take(&mut state.fail_next_commit) {
            return Err(sqlx::Error::Protocol("simulated commit failure".to_string()));
        }

        let mut created = Vec::with_capacity(panels.len());
        for (_, input) in panels {
            let id = state.next_id();
            created.push(ComicImage {
                id,
                project_id: input.project_id,
                character_template_id: input.character_template_id,
                prompt: input.prompt.clone(),
                image_url: input.image_url.clone(),
                provider_task_id: input.provider_task_id.clone(),
                status: input.status.as_str().to_string(),
                position_x: input.position_x,
                position_y: input.position_y,
                width: input.width,
                height: input.height,
                layer_order: input.layer_order,
                created_at: Utc::now(),
            });
        }

        // Link only after every panel is built so a failure leaves no trace.
        for ((storyboard_id, _), image) in panels.iter().zip(&created) {
            if let Some(sb) = state
                .storyboards
                .iter_mut()
                .find(|sb| sb.id == *storyboard_id && sb.project_id == image.project_id)
            {
                sb.comic_image_id = Some(image.id);
            }
        }
        state.images.extend(created.iter().cloned());
        Ok(created)
    }
}

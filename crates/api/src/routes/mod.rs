pub mod comics;
pub mod health;
pub mod stories;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /stories/analyze                   analyze story text (POST)
/// /stories/save                      replace a project's storyboards (POST)
/// /stories/generate_all              generate a panel per storyboard (POST)
/// /stories/list/{project_id}         list storyboards (GET)
///
/// /comics/generate                   generate one image (POST)
/// /comics/status/{task_id}           generation status (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/stories", stories::router())
        .nest("/comics", comics::router())
}

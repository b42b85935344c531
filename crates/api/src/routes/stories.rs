use axum::routing::{get, post};
use axum::Router;

use crate::handlers::stories;
use crate::state::AppState;

/// Routes mounted at `/stories`.
///
/// ```text
/// POST   /analyze                 -> analyze
/// POST   /save                    -> save
/// POST   /generate_all            -> generate_all
/// GET    /list/{project_id}       -> list
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(stories::analyze))
        .route("/save", post(stories::save))
        .route("/generate_all", post(stories::generate_all))
        .route("/list/{project_id}", get(stories::list))
}

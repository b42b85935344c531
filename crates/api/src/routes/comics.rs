use axum::routing::{get, post};
use axum::Router;

use crate::handlers::comics;
use crate::state::AppState;

/// Routes mounted at `/comics`.
///
/// ```text
/// POST   /generate                -> generate
/// GET    /status/{task_id}        -> status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(comics::generate))
        .route("/status/{task_id}", get(comics::status))
}

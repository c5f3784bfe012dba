use crate::handlers;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;

/// All sidecar routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/detect-faces", post(handlers::detect_faces))
        .route("/api/recognize", post(handlers::recognize))
}

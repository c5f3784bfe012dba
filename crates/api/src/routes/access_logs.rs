//! Route definitions for the access-logs resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::access_logs;
use crate::state::AppState;

/// Routes mounted at `/api/access-logs`.
///
/// `/today` must be registered alongside `/{id}`; axum routes the literal
/// segment before the capture.
///
/// ```text
/// GET    /        -> list (windowed, filtered, paginated)
/// POST   /        -> create
/// GET    /today   -> list_today
/// GET    /{id}    -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(access_logs::list).post(access_logs::create))
        .route("/today", get(access_logs::list_today))
        .route("/{id}", get(access_logs::get_by_id))
}

//! Route definitions for the doors resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::doors;
use crate::state::AppState;

/// Routes mounted at `/api/doors`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete (soft)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(doors::list).post(doors::create))
        .route(
            "/{id}",
            get(doors::get_by_id)
                .put(doors::update)
                .delete(doors::delete),
        )
}

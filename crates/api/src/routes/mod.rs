//! Route tree for the CRUD service.

pub mod access_logs;
pub mod doors;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /users                      list, create
/// /users/{id}                 get, update
///
/// /doors                      list, create
/// /doors/{id}                 get, update, delete (soft)
///
/// /access-logs                list (windowed), create
/// /access-logs/today          today's logs
/// /access-logs/{id}           get
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/doors", doors::router())
        .nest("/access-logs", access_logs::router())
}

//! Handlers for the `/api/users` resource.
//!
//! Users have no delete endpoint; deactivation happens through the
//! lifecycle status field on update.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use gatehouse_core::error::CoreError;
use gatehouse_core::types::DbId;
use gatehouse_db::models::user::{CreateUser, UpdateUser, User};
use gatehouse_db::repositories::UserRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// POST /api/users/
///
/// Email and employee_id collisions surface as 409 via the store's unique
/// constraints; there is no pre-check here.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = UserRepo::create(&state.pool, &input).await?;
    tracing::info!(user_id = user.id, "User created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/users/
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users))
}

/// GET /api/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<User>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "User", id })?;
    Ok(Json(user))
}

/// PUT /api/users/{id}
///
/// Applies only the provided fields; `updated_at` is refreshed.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<User>> {
    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound { entity: "User", id })?;
    Ok(Json(user))
}

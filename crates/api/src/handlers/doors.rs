//! Handlers for the `/api/doors` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use gatehouse_core::error::CoreError;
use gatehouse_core::types::DbId;
use gatehouse_db::models::door::{CreateDoor, Door, UpdateDoor};
use gatehouse_db::repositories::DoorRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// POST /api/doors/
///
/// Registers a new door. The device binding must be unique; a duplicate
/// `device_id` is rejected before the insert is attempted (the `uq_`
/// constraint remains as a backstop against races).
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateDoor>,
) -> AppResult<(StatusCode, Json<Door>)> {
    if DoorRepo::find_by_device_id(&state.pool, &input.device_id)
        .await?
        .is_some()
    {
        return Err(CoreError::Conflict("Device ID already registered".to_string()).into());
    }

    let door = DoorRepo::create(&state.pool, &input).await?;
    tracing::info!(door_id = door.id, device_id = %door.device_id, "Door registered");
    Ok((StatusCode::CREATED, Json(door)))
}

/// GET /api/doors/
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Door>>> {
    let doors = DoorRepo::list(&state.pool).await?;
    Ok(Json(doors))
}

/// GET /api/doors/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Door>> {
    let door = DoorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Door", id })?;
    Ok(Json(door))
}

/// PUT /api/doors/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDoor>,
) -> AppResult<Json<Door>> {
    let door = DoorRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound { entity: "Door", id })?;
    Ok(Json(door))
}

/// DELETE /api/doors/{id}
///
/// Soft delete: flips the door to inactive. The record stays queryable.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = DoorRepo::soft_delete(&state.pool, id).await?;
    if !deleted {
        return Err(CoreError::NotFound { entity: "Door", id }.into());
    }
    tracing::info!(door_id = id, "Door deactivated");
    Ok(StatusCode::NO_CONTENT)
}

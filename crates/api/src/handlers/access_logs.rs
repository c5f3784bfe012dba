//! Handlers for the `/api/access-logs` resource.
//!
//! Logs are append-only: creation and windowed queries, no mutation.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use gatehouse_core::error::CoreError;
use gatehouse_core::types::DbId;
use gatehouse_db::models::access_log::{AccessLog, AccessLogFilter, CreateAccessLog};
use gatehouse_db::repositories::{AccessLogRepo, DoorRepo, UserRepo};
use serde::Deserialize;

use crate::error::AppResult;
use crate::state::AppState;

/// Query parameters for the windowed list endpoint.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub user_id: Option<DbId>,
    pub door_id: Option<DbId>,
    /// Window size in days; there is no enforced upper bound.
    #[serde(default = "default_days")]
    pub days: i64,
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_days() -> i64 {
    7
}

fn default_limit() -> i64 {
    100
}

/// POST /api/access-logs/
///
/// Validates the door reference (and the user reference, if given) before
/// insert. The timestamp is assigned server-side.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateAccessLog>,
) -> AppResult<(StatusCode, Json<AccessLog>)> {
    if DoorRepo::find_by_id(&state.pool, input.door_id)
        .await?
        .is_none()
    {
        return Err(CoreError::NotFound {
            entity: "Door",
            id: input.door_id,
        }
        .into());
    }

    if let Some(user_id) = input.user_id {
        if UserRepo::find_by_id(&state.pool, user_id).await?.is_none() {
            return Err(CoreError::NotFound {
                entity: "User",
                id: user_id,
            }
            .into());
        }
    }

    let log = AccessLogRepo::create(&state.pool, &input).await?;
    tracing::info!(
        log_id = log.id,
        door_id = log.door_id,
        status = %log.status,
        "Access log created"
    );
    Ok((StatusCode::CREATED, Json(log)))
}

/// GET /api/access-logs/?user_id=&door_id=&days=7&skip=0&limit=100
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<AccessLog>>> {
    let filter = AccessLogFilter {
        user_id: params.user_id,
        door_id: params.door_id,
        days: params.days,
        skip: params.skip,
        limit: params.limit,
    };
    let logs = AccessLogRepo::list(&state.pool, &filter).await?;
    Ok(Json(logs))
}

/// GET /api/access-logs/today
///
/// All logs since UTC midnight, newest first, no pagination.
pub async fn list_today(State(state): State<AppState>) -> AppResult<Json<Vec<AccessLog>>> {
    let logs = AccessLogRepo::list_today(&state.pool).await?;
    Ok(Json(logs))
}

/// GET /api/access-logs/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<AccessLog>> {
    let log = AccessLogRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Access log",
            id,
        })?;
    Ok(Json(log))
}

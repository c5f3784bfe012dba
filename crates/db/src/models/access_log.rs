//! Access log entity model and DTOs.

use gatehouse_core::access::LOG_STATUS_SUCCESS;
use gatehouse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full row from the `access_logs` table. Immutable once created.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AccessLog {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub door_id: DbId,
    /// Set server-side at insert time.
    pub timestamp: Timestamp,
    pub status: String,
    pub confidence_score: Option<f64>,
    pub photo_filename: Option<String>,
    pub notes: Option<String>,
}

/// DTO for creating a new access log entry.
#[derive(Debug, Deserialize)]
pub struct CreateAccessLog {
    pub user_id: Option<DbId>,
    pub door_id: DbId,
    #[serde(default = "default_status")]
    pub status: String,
    pub confidence_score: Option<f64>,
    pub notes: Option<String>,
}

fn default_status() -> String {
    LOG_STATUS_SUCCESS.to_string()
}

/// Filter for windowed access-log listing.
#[derive(Debug, Clone)]
pub struct AccessLogFilter {
    pub user_id: Option<DbId>,
    pub door_id: Option<DbId>,
    /// Window size: only logs with `timestamp >= now - days` are returned.
    pub days: i64,
    pub skip: i64,
    pub limit: i64,
}

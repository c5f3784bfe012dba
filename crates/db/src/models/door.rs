//! Door entity model and DTOs.

use gatehouse_core::access::LifecycleStatus;
use gatehouse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full door row from the `doors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Door {
    pub id: DbId,
    pub name: String,
    pub location: Option<String>,
    pub device_id: String,
    pub camera_url: Option<String>,
    pub status: LifecycleStatus,
    pub created_at: Timestamp,
}

/// DTO for creating a new door.
#[derive(Debug, Deserialize)]
pub struct CreateDoor {
    pub name: String,
    pub location: Option<String>,
    pub device_id: String,
    pub camera_url: Option<String>,
    #[serde(default)]
    pub status: LifecycleStatus,
}

/// DTO for updating an existing door. All fields are optional.
///
/// `device_id` is immutable after registration and cannot be patched.
#[derive(Debug, Deserialize)]
pub struct UpdateDoor {
    pub name: Option<String>,
    pub location: Option<String>,
    pub camera_url: Option<String>,
    pub status: Option<LifecycleStatus>,
}

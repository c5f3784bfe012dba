//! User entity model and DTOs.

use gatehouse_core::access::LifecycleStatus;
use gatehouse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub employee_id: Option<String>,
    pub status: LifecycleStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub employee_id: Option<String>,
    #[serde(default)]
    pub status: LifecycleStatus,
}

/// DTO for updating an existing user. All fields are optional.
///
/// `employee_id` is deliberately absent: the badge binding is set at
/// enrollment and never patched through this surface.
#[derive(Debug, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub status: Option<LifecycleStatus>,
}

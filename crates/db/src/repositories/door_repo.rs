//! Repository for the `doors` table.

use gatehouse_core::types::DbId;
use sqlx::PgPool;

use crate::models::door::{CreateDoor, Door, UpdateDoor};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, location, device_id, camera_url, status, created_at";

/// Provides CRUD operations for doors. Doors are soft-deleted only.
pub struct DoorRepo;

impl DoorRepo {
    /// Insert a new door, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateDoor) -> Result<Door, sqlx::Error> {
        let query = format!(
            "INSERT INTO doors (name, location, device_id, camera_url, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Door>(&query)
            .bind(&input.name)
            .bind(&input.location)
            .bind(&input.device_id)
            .bind(&input.camera_url)
            .bind(input.status)
            .fetch_one(pool)
            .await
    }

    /// Find a door by internal ID. Soft-deleted doors remain visible.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Door>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM doors WHERE id = $1");
        sqlx::query_as::<_, Door>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a door by its device identifier.
    pub async fn find_by_device_id(
        pool: &PgPool,
        device_id: &str,
    ) -> Result<Option<Door>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM doors WHERE device_id = $1");
        sqlx::query_as::<_, Door>(&query)
            .bind(device_id)
            .fetch_optional(pool)
            .await
    }

    /// List all doors, inactive included, no pagination.
    pub async fn list(pool: &PgPool) -> Result<Vec<Door>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM doors ORDER BY id");
        sqlx::query_as::<_, Door>(&query).fetch_all(pool).await
    }

    /// Update a door. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDoor,
    ) -> Result<Option<Door>, sqlx::Error> {
        let query = format!(
            "UPDATE doors SET
                name = COALESCE($2, name),
                location = COALESCE($3, location),
                camera_url = COALESCE($4, camera_url),
                status = COALESCE($5, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Door>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.location)
            .bind(&input.camera_url)
            .bind(input.status)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a door by setting `status = 'inactive'`. The row stays
    /// queryable through `find_by_id` and `list`.
    ///
    /// Returns `true` if a row with the given `id` exists.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE doors SET status = 'inactive' WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::debug!(door_id = id, "door marked inactive");
        }
        Ok(deleted)
    }
}

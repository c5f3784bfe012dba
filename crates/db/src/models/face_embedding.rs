//! Face embedding placeholder model.
//!
//! Rows are written at enrollment time and never consumed by any matching
//! logic in this system; the sidecar performs detection only.

use gatehouse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full row from the `face_embeddings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FaceEmbedding {
    pub id: DbId,
    pub user_id: DbId,
    /// Opaque text blob produced by the enrollment pipeline.
    pub embedding: String,
    pub photo_filename: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for storing an embedding against a user.
#[derive(Debug, Deserialize)]
pub struct CreateFaceEmbedding {
    pub user_id: DbId,
    pub embedding: String,
    pub photo_filename: Option<String>,
}

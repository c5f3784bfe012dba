//! Repository for the `face_embeddings` table.

use gatehouse_core::types::DbId;
use sqlx::PgPool;

use crate::models::face_embedding::{CreateFaceEmbedding, FaceEmbedding};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, embedding, photo_filename, created_at";

/// Stores enrollment embeddings. Nothing in this system reads them back
/// for matching; they exist for the enrollment pipeline.
pub struct FaceEmbeddingRepo;

impl FaceEmbeddingRepo {
    /// Insert an embedding for a user, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateFaceEmbedding,
    ) -> Result<FaceEmbedding, sqlx::Error> {
        let query = format!(
            "INSERT INTO face_embeddings (user_id, embedding, photo_filename)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FaceEmbedding>(&query)
            .bind(input.user_id)
            .bind(&input.embedding)
            .bind(&input.photo_filename)
            .fetch_one(pool)
            .await
    }

    /// List all embeddings belonging to a user, oldest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<FaceEmbedding>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM face_embeddings WHERE user_id = $1 ORDER BY created_at"
        );
        sqlx::query_as::<_, FaceEmbedding>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}

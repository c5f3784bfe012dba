//! Repository for the `access_logs` table.
//!
//! Access logs are append-only: there are no update or delete methods.

use chrono::{Duration, Utc};
use gatehouse_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::access_log::{AccessLog, AccessLogFilter, CreateAccessLog};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, door_id, timestamp, status, confidence_score, photo_filename, notes";

/// Provides insert and windowed query operations for access logs.
pub struct AccessLogRepo;

impl AccessLogRepo {
    /// Insert a new access log entry. The timestamp is assigned by the
    /// database at insert time.
    pub async fn create(pool: &PgPool, input: &CreateAccessLog) -> Result<AccessLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO access_logs (user_id, door_id, status, confidence_score, notes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AccessLog>(&query)
            .bind(input.user_id)
            .bind(input.door_id)
            .bind(&input.status)
            .bind(input.confidence_score)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find an access log by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AccessLog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM access_logs WHERE id = $1");
        sqlx::query_as::<_, AccessLog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List logs within the filter's recency window, newest first.
    ///
    /// `days = 0` restricts the window to `timestamp >= now`, which
    /// excludes everything created before the call. There is no upper
    /// bound on `days`; windows past the representable range saturate to
    /// the beginning of time and return the whole history.
    pub async fn list(
        pool: &PgPool,
        filter: &AccessLogFilter,
    ) -> Result<Vec<AccessLog>, sqlx::Error> {
        // Windows too large for chrono (or reaching past the epoch)
        // saturate to the Unix epoch, which predates every possible row.
        let date_from: Timestamp = Duration::try_days(filter.days)
            .and_then(|window| Utc::now().checked_sub_signed(window))
            .unwrap_or(chrono::DateTime::UNIX_EPOCH);
        let query = format!(
            "SELECT {COLUMNS} FROM access_logs
             WHERE timestamp >= $1
               AND ($2::bigint IS NULL OR user_id = $2)
               AND ($3::bigint IS NULL OR door_id = $3)
             ORDER BY timestamp DESC
             OFFSET $4 LIMIT $5"
        );
        sqlx::query_as::<_, AccessLog>(&query)
            .bind(date_from)
            .bind(filter.user_id)
            .bind(filter.door_id)
            .bind(filter.skip)
            .bind(filter.limit)
            .fetch_all(pool)
            .await
    }

    /// List all logs since UTC midnight of the current day, newest first,
    /// without pagination.
    pub async fn list_today(pool: &PgPool) -> Result<Vec<AccessLog>, sqlx::Error> {
        let midnight: Timestamp = Utc::now()
            .date_naive()
            .and_time(chrono::NaiveTime::MIN)
            .and_utc();
        let query = format!(
            "SELECT {COLUMNS} FROM access_logs
             WHERE timestamp >= $1
             ORDER BY timestamp DESC"
        );
        sqlx::query_as::<_, AccessLog>(&query)
            .bind(midnight)
            .fetch_all(pool)
            .await
    }
}

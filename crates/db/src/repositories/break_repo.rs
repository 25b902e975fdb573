//! Repository for the `breaks` table.
//!
//! Only [`crate::BreakStore`] calls the mutating methods, always inside a
//! transaction that also appends the matching revision.

use breaktime_core::time_of_day::TimeRange;
use breaktime_core::types::{format_timestamp, DbId, Timestamp};
use sqlx::SqliteExecutor;

use crate::models::break_entry::BreakEntry;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, start_time, end_time, description, is_deleted, created_at, updated_at";

/// Provides query and in-place mutation operations for breaks.
pub struct BreakRepo;

impl BreakRepo {
    /// List breaks ordered by start time, ties broken by id.
    pub async fn list<'e, E>(executor: E, include_deleted: bool) -> Result<Vec<BreakEntry>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM breaks
             WHERE ($1 OR is_deleted = 0)
             ORDER BY start_time ASC, id ASC"
        );
        sqlx::query_as::<_, BreakEntry>(&query)
            .bind(include_deleted)
            .fetch_all(executor)
            .await
    }

    /// Active breaks other than `exclude_id`, in the same order as [`Self::list`].
    pub async fn list_active_except<'e, E>(
        executor: E,
        exclude_id: Option<DbId>,
    ) -> Result<Vec<BreakEntry>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM breaks
             WHERE is_deleted = 0 AND ($1 IS NULL OR id != $1)
             ORDER BY start_time ASC, id ASC"
        );
        sqlx::query_as::<_, BreakEntry>(&query)
            .bind(exclude_id)
            .fetch_all(executor)
            .await
    }

    /// Find a break by id, including soft-deleted rows.
    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<BreakEntry>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM breaks WHERE id = $1");
        sqlx::query_as::<_, BreakEntry>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn count_active<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_scalar("SELECT COUNT(*) FROM breaks WHERE is_deleted = 0")
            .fetch_one(executor)
            .await
    }

    /// Insert a new break with an auto-assigned id.
    pub async fn insert<'e, E>(
        executor: E,
        range: &TimeRange,
        description: &str,
        now: Timestamp,
    ) -> Result<BreakEntry, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO breaks (start_time, end_time, description, is_deleted, created_at, updated_at)
             VALUES ($1, $2, $3, 0, $4, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BreakEntry>(&query)
            .bind(range.start.to_string())
            .bind(range.end.to_string())
            .bind(description)
            .bind(format_timestamp(&now))
            .fetch_one(executor)
            .await
    }

    /// Insert a break with an externally supplied id, or overwrite the row
    /// that already has that id (clearing its deleted flag).
    pub async fn upsert_with_id<'e, E>(
        executor: E,
        id: DbId,
        range: &TimeRange,
        description: &str,
        now: Timestamp,
    ) -> Result<BreakEntry, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO breaks (id, start_time, end_time, description, is_deleted, created_at, updated_at)
             VALUES ($1, $2, $3, $4, 0, $5, $5)
             ON CONFLICT(id) DO UPDATE SET
                start_time = excluded.start_time,
                end_time = excluded.end_time,
                description = excluded.description,
                is_deleted = 0,
                updated_at = excluded.updated_at
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BreakEntry>(&query)
            .bind(id)
            .bind(range.start.to_string())
            .bind(range.end.to_string())
            .bind(description)
            .bind(format_timestamp(&now))
            .fetch_one(executor)
            .await
    }

    /// Overwrite the fields of an active break. Returns `None` if the break is
    /// missing or soft-deleted.
    pub async fn update_fields<'e, E>(
        executor: E,
        id: DbId,
        range: &TimeRange,
        description: &str,
        now: Timestamp,
    ) -> Result<Option<BreakEntry>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let query = format!(
            "UPDATE breaks SET
                start_time = $2,
                end_time = $3,
                description = $4,
                updated_at = $5
             WHERE id = $1 AND is_deleted = 0
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BreakEntry>(&query)
            .bind(id)
            .bind(range.start.to_string())
            .bind(range.end.to_string())
            .bind(description)
            .bind(format_timestamp(&now))
            .fetch_optional(executor)
            .await
    }

    /// Overwrite the fields of any break and force it back to active.
    pub async fn restore_fields<'e, E>(
        executor: E,
        id: DbId,
        range: &TimeRange,
        description: &str,
        now: Timestamp,
    ) -> Result<Option<BreakEntry>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let query = format!(
            "UPDATE breaks SET
                start_time = $2,
                end_time = $3,
                description = $4,
                is_deleted = 0,
                updated_at = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BreakEntry>(&query)
            .bind(id)
            .bind(range.start.to_string())
            .bind(range.end.to_string())
            .bind(description)
            .bind(format_timestamp(&now))
            .fetch_optional(executor)
            .await
    }

    /// Soft-delete an active break. Returns `true` if a row was marked deleted.
    pub async fn mark_deleted<'e, E>(executor: E, id: DbId, now: Timestamp) -> Result<bool, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query(
            "UPDATE breaks SET is_deleted = 1, updated_at = $2 \
             WHERE id = $1 AND is_deleted = 0",
        )
        .bind(id)
        .bind(format_timestamp(&now))
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

//! Repository for the append-only `break_revisions` table.

use breaktime_core::types::{format_timestamp, DbId, Timestamp};
use sqlx::SqliteExecutor;

use crate::models::break_revision::{BreakRevision, NewBreakRevision};

const COLUMNS: &str =
    "id, break_id, start_time, end_time, description, change_type, changed_by, changed_at";

/// Provides append and query operations for break revisions.
///
/// There is intentionally no update or delete method.
pub struct BreakRevisionRepo;

impl BreakRevisionRepo {
    /// Append a revision, returning the stored row.
    pub async fn insert<'e, E>(
        executor: E,
        input: &NewBreakRevision<'_>,
    ) -> Result<BreakRevision, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO break_revisions
                (break_id, start_time, end_time, description, change_type, changed_by, changed_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BreakRevision>(&query)
            .bind(input.break_id)
            .bind(input.start)
            .bind(input.end)
            .bind(input.description)
            .bind(input.change_type.as_str())
            .bind(input.changed_by)
            .bind(format_timestamp(&input.changed_at))
            .fetch_one(executor)
            .await
    }

    /// List revisions newest first, optionally for a single break.
    pub async fn list<'e, E>(
        executor: E,
        break_id: Option<DbId>,
    ) -> Result<Vec<BreakRevision>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM break_revisions
             WHERE ($1 IS NULL OR break_id = $1)
             ORDER BY changed_at DESC, id DESC"
        );
        sqlx::query_as::<_, BreakRevision>(&query)
            .bind(break_id)
            .fetch_all(executor)
            .await
    }

    pub async fn find_by_id<'e, E>(
        executor: E,
        id: DbId,
    ) -> Result<Option<BreakRevision>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM break_revisions WHERE id = $1");
        sqlx::query_as::<_, BreakRevision>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_scalar("SELECT COUNT(*) FROM break_revisions")
            .fetch_one(executor)
            .await
    }

    /// Most recent `changed_at` ever written, if any revision exists.
    pub async fn latest_changed_at<'e, E>(executor: E) -> Result<Option<Timestamp>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_scalar::<_, Option<Timestamp>>("SELECT MAX(changed_at) FROM break_revisions")
            .fetch_one(executor)
            .await
    }
}

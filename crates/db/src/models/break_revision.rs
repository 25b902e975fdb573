//! Break revision model.
//!
//! Revisions are immutable snapshots appended on every break state transition.

use breaktime_core::error::CoreError;
use breaktime_core::schedule::ChangeType;
use breaktime_core::time_of_day::TimeRange;
use breaktime_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::break_entry::BreakEntry;

/// A row from the `break_revisions` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct BreakRevision {
    pub id: DbId,
    pub break_id: Option<DbId>,
    #[sqlx(rename = "start_time")]
    pub start: String,
    #[sqlx(rename = "end_time")]
    pub end: String,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub change_type: ChangeType,
    pub changed_by: String,
    pub changed_at: Timestamp,
}

impl BreakRevision {
    pub fn range(&self) -> Result<TimeRange, CoreError> {
        TimeRange::parse(&self.start, &self.end)
    }
}

/// Insert payload for a new revision.
#[derive(Debug, Clone)]
pub struct NewBreakRevision<'a> {
    pub break_id: DbId,
    pub start: &'a str,
    pub end: &'a str,
    pub description: &'a str,
    pub change_type: ChangeType,
    pub changed_by: &'a str,
    pub changed_at: Timestamp,
}

impl<'a> NewBreakRevision<'a> {
    /// Snapshot the current fields of `entry`.
    pub fn snapshot(
        entry: &'a BreakEntry,
        change_type: ChangeType,
        changed_by: &'a str,
        changed_at: Timestamp,
    ) -> Self {
        Self {
            break_id: entry.id,
            start: &entry.start,
            end: &entry.end,
            description: &entry.description,
            change_type,
            changed_by,
            changed_at,
        }
    }
}

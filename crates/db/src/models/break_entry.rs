//! Break entity model and DTOs.

use breaktime_core::error::CoreError;
use breaktime_core::schedule::BreakStatus;
use breaktime_core::time_of_day::TimeRange;
use breaktime_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `breaks` table.
///
/// `start` / `end` are always stored normalized (`HH:MM`), so ordering by the
/// text column equals ordering by time of day.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct BreakEntry {
    pub id: DbId,
    #[sqlx(rename = "start_time")]
    pub start: String,
    #[sqlx(rename = "end_time")]
    pub end: String,
    pub description: String,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl BreakEntry {
    pub fn status(&self) -> BreakStatus {
        BreakStatus::from_deleted_flag(self.is_deleted)
    }

    /// Parse the stored times back into a range.
    pub fn range(&self) -> Result<TimeRange, CoreError> {
        TimeRange::parse(&self.start, &self.end)
    }
}

/// Request body for creating or replacing a break.
#[derive(Debug, Clone, Deserialize)]
pub struct BreakInput {
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub description: String,
}

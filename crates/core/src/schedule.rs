//! Break lifecycle vocabulary: change types, status and actor constants.
//!
//! This module lives in `core` (zero internal deps) so that both the store
//! and the HTTP layer share one definition of the revision taxonomy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::time_of_day::TimeRange;
use crate::types::DbId;

/// Actor recorded when a mutation arrives without an authenticated identity.
pub const ACTOR_UNKNOWN: &str = "unknown";

/// Actor recorded for bootstrap imports.
pub const ACTOR_SEED: &str = "seed";

/// Entity names used in `CoreError::NotFound`.
pub const ENTITY_BREAK: &str = "Break";
pub const ENTITY_REVISION: &str = "Revision";

// ---------------------------------------------------------------------------
// Change type
// ---------------------------------------------------------------------------

/// Why a revision exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Seed,
    Create,
    Update,
    Delete,
    Restore,
}

impl ChangeType {
    pub const ALL: [ChangeType; 5] = [
        ChangeType::Seed,
        ChangeType::Create,
        ChangeType::Update,
        ChangeType::Delete,
        ChangeType::Restore,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChangeType::Seed => "seed",
            ChangeType::Create => "create",
            ChangeType::Update => "update",
            ChangeType::Delete => "delete",
            ChangeType::Restore => "restore",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChangeType::ALL
            .into_iter()
            .find(|ct| ct.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown change type '{s}'")))
    }
}

/// Row decoding goes through `String` (`#[sqlx(try_from = "String")]`).
impl TryFrom<String> for ChangeType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Break lifecycle state. `Active ⇄ Deleted`, no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakStatus {
    Active,
    Deleted,
}

impl BreakStatus {
    pub fn from_deleted_flag(is_deleted: bool) -> Self {
        if is_deleted {
            BreakStatus::Deleted
        } else {
            BreakStatus::Active
        }
    }

    pub fn is_active(self) -> bool {
        matches!(self, BreakStatus::Active)
    }
}

/// Message for an overlap rejection, naming the conflicting break.
pub fn overlap_message(conflict_id: DbId, range: &TimeRange) -> String {
    format!(
        "Break overlaps with existing break {conflict_id} ({} - {})",
        range.start, range.end
    )
}

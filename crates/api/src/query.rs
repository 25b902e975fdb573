//! Shared query parameter types for API handlers.

use breaktime_core::types::DbId;
use serde::Deserialize;

/// Query parameters for list endpoints that support an `include_deleted` flag.
#[derive(Debug, Deserialize)]
pub struct IncludeDeletedParams {
    #[serde(default)]
    pub include_deleted: bool,
}

/// `?break_id=` filter for the revision listing.
#[derive(Debug, Deserialize)]
pub struct RevisionFilterParams {
    pub break_id: Option<DbId>,
}

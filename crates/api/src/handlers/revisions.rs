//! Handlers for the `/revisions` resource.

use axum::extract::{Query, State};
use axum::Json;
use breaktime_core::types::DbId;
use breaktime_db::models::break_entry::BreakEntry;
use breaktime_db::models::break_revision::BreakRevision;

use crate::error::AppResult;
use crate::extract::ApiPath;
use crate::middleware::auth::Actor;
use crate::query::RevisionFilterParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/revisions
///
/// All revisions newest first, optionally filtered with `?break_id=`.
pub async fn list_revisions(
    State(state): State<AppState>,
    Query(params): Query<RevisionFilterParams>,
) -> AppResult<Json<DataResponse<Vec<BreakRevision>>>> {
    let revisions = state.store.list_revisions(params.break_id).await?;
    Ok(Json(DataResponse { data: revisions }))
}

/// POST /api/v1/revisions/{id}/restore
///
/// Put the break back to this revision's values, reactivating it if it was
/// deleted. Returns 400 if the restored range would overlap another active
/// break.
pub async fn restore_revision(
    State(state): State<AppState>,
    actor: Actor,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<DataResponse<BreakEntry>>> {
    let entry = state.store.restore_revision(id, &actor.name).await?;
    Ok(Json(DataResponse { data: entry }))
}

//! Handlers for the `/breaks` resource.
//!
//! Every mutation goes through [`breaktime_db::BreakStore`], which validates
//! the range, rejects overlaps, and appends the matching revision.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use breaktime_core::types::DbId;
use breaktime_db::models::break_entry::{BreakEntry, BreakInput};
use breaktime_db::models::break_revision::BreakRevision;

use crate::error::AppResult;
use crate::extract::ApiPath;
use crate::middleware::auth::Actor;
use crate::query::IncludeDeletedParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/breaks
///
/// Active breaks ordered by start time. `?include_deleted=true` adds
/// soft-deleted ones.
pub async fn list_breaks(
    State(state): State<AppState>,
    Query(params): Query<IncludeDeletedParams>,
) -> AppResult<Json<DataResponse<Vec<BreakEntry>>>> {
    let breaks = state.store.list_breaks(params.include_deleted).await?;
    Ok(Json(DataResponse { data: breaks }))
}

/// POST /api/v1/breaks
pub async fn create_break(
    State(state): State<AppState>,
    actor: Actor,
    Json(input): Json<BreakInput>,
) -> AppResult<(StatusCode, Json<DataResponse<BreakEntry>>)> {
    let entry = state
        .store
        .create_break(&input.start, &input.end, &input.description, &actor.name)
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// GET /api/v1/breaks/{id}
pub async fn get_break(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<DataResponse<BreakEntry>>> {
    let entry = state.store.get_break(id).await?;
    Ok(Json(DataResponse { data: entry }))
}

/// PUT /api/v1/breaks/{id}
///
/// Replace start, end and description. Deleted breaks return 404; restore
/// them through a revision instead.
pub async fn update_break(
    State(state): State<AppState>,
    actor: Actor,
    ApiPath(id): ApiPath<DbId>,
    Json(input): Json<BreakInput>,
) -> AppResult<Json<DataResponse<BreakEntry>>> {
    let entry = state
        .store
        .update_break(id, &input.start, &input.end, &input.description, &actor.name)
        .await?;
    Ok(Json(DataResponse { data: entry }))
}

/// DELETE /api/v1/breaks/{id}
pub async fn delete_break(
    State(state): State<AppState>,
    actor: Actor,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    state.store.delete_break(id, &actor.name).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/breaks/{id}/revisions
///
/// History of one break, newest first. 404 if the break never existed.
pub async fn list_break_revisions(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<DataResponse<Vec<BreakRevision>>>> {
    state.store.get_break(id).await?;
    let revisions = state.store.list_revisions(Some(id)).await?;
    Ok(Json(DataResponse { data: revisions }))
}

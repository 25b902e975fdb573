//! Route definitions for the `/revisions` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::revisions;
use crate::state::AppState;

/// Routes mounted at `/revisions`.
///
/// ```text
/// GET    /                  -> list_revisions  (?break_id=)
/// POST   /{id}/restore      -> restore_revision
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(revisions::list_revisions))
        .route("/{id}/restore", post(revisions::restore_revision))
}

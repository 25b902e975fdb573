//! Route definitions for the `/breaks` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::breaks;
use crate::state::AppState;

/// Routes mounted at `/breaks`.
///
/// ```text
/// GET    /                  -> list_breaks  (?include_deleted=bool)
/// POST   /                  -> create_break
/// GET    /{id}              -> get_break
/// PUT    /{id}              -> update_break
/// DELETE /{id}              -> delete_break
/// GET    /{id}/revisions    -> list_break_revisions
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(breaks::list_breaks).post(breaks::create_break))
        .route(
            "/{id}",
            get(breaks::get_break)
                .put(breaks::update_break)
                .delete(breaks::delete_break),
        )
        .route("/{id}/revisions", get(breaks::list_break_revisions))
}

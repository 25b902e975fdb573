pub mod breaks;
pub mod health;
pub mod revisions;
pub mod sounds;

use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /config                                          active breaks + sound settings
///
/// /breaks                                          list, create
/// /breaks/{id}                                     get, update, delete
/// /breaks/{id}/revisions                           history of one break
///
/// /revisions                                       list (?break_id=)
/// /revisions/{id}/restore                          restore (POST)
///
/// /sounds/settings                                 list
/// /sounds/settings/{key}                           upsert (PUT), delete
/// /sounds/files                                    list, upload (multipart)
///
/// /time                                            server clock + NTP time
/// ```
///
/// Unmatched paths under `/api/v1` get a JSON 404 rather than the
/// frontend fallback.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/config", get(handlers::app_config::get_config))
        .route("/time", get(handlers::time::get_time))
        .nest("/breaks", breaks::router())
        .nest("/revisions", revisions::router())
        .nest("/sounds", sounds::router())
        .fallback(api_not_found)
}

async fn api_not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": format!("No route for {}", uri.path()),
            "code": "NOT_FOUND",
        })),
    )
}

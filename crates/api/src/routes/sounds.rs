//! Route definitions for the `/sounds` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::sounds;
use crate::state::AppState;

/// Routes mounted at `/sounds`.
///
/// ```text
/// GET    /settings          -> list_settings
/// PUT    /settings/{key}    -> put_setting
/// DELETE /settings/{key}    -> delete_setting
/// GET    /files             -> list_files
/// POST   /files             -> upload_file (multipart `file`)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/settings", get(sounds::list_settings))
        .route(
            "/settings/{key}",
            put(sounds::put_setting).delete(sounds::delete_setting),
        )
        .route("/files", get(sounds::list_files).post(sounds::upload_file))
}

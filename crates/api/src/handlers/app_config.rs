//! Combined configuration read by the frontend on startup.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use breaktime_db::models::break_entry::BreakEntry;
use breaktime_db::repositories::SoundSettingRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AppConfig {
    /// Active breaks in schedule order.
    pub breaks: Vec<BreakEntry>,
    /// Sound settings keyed by name.
    pub sounds: BTreeMap<String, String>,
}

/// GET /api/v1/config
pub async fn get_config(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<AppConfig>>> {
    let breaks = state.store.list_breaks(false).await?;
    let sounds = SoundSettingRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(|s| (s.key, s.value))
        .collect();
    Ok(Json(DataResponse {
        data: AppConfig { breaks, sounds },
    }))
}

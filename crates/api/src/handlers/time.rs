use std::time::Duration;

use axum::extract::State;
use axum::Json;
use breaktime_core::types::Timestamp;
use chrono::Utc;
use serde::Serialize;

use crate::response::DataResponse;
use crate::state::AppState;
use crate::time_source::fetch_unix_time;

#[derive(Debug, Serialize)]
pub struct TimeReport {
    pub server_time: Timestamp,
    /// Unix seconds from the NTP server, `null` when it could not be reached.
    pub ntp_time: Option<i64>,
    pub ntp_server: String,
}

/// GET /api/v1/time
///
/// Never fails: an unreachable NTP server is logged and reported as `null`.
pub async fn get_time(State(state): State<AppState>) -> Json<DataResponse<TimeReport>> {
    let server = &state.config.ntp_server;
    let timeout = Duration::from_secs(state.config.ntp_timeout_secs);

    let ntp_time = match fetch_unix_time(server, timeout).await {
        Ok(seconds) => Some(seconds),
        Err(e) => {
            tracing::warn!(server = %server, error = %e, "NTP request failed");
            None
        }
    };

    Json(DataResponse {
        data: TimeReport {
            server_time: Utc::now(),
            ntp_time,
            ntp_server: server.clone(),
        },
    })
}

//! Handlers for sound settings and uploaded sound files.
//!
//! Settings are plain key/value pairs without revision history. Files live
//! in `SOUNDS_DIR` and are served back under `/sounds/{name}`.

use std::path::Path;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use breaktime_core::sound::{sanitize_sound_filename, validate_setting_key, validate_setting_value};
use breaktime_db::models::sound_setting::{SoundSetting, UpdateSoundSetting};
use breaktime_db::repositories::SoundSettingRepo;
use chrono::Utc;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::ApiPath;
use crate::middleware::auth::Actor;
use crate::response::DataResponse;
use crate::state::AppState;

/// A stored sound file.
#[derive(Debug, Serialize)]
pub struct SoundFile {
    pub name: String,
    pub size_bytes: u64,
    /// Path the file is served from.
    pub url: String,
}

impl SoundFile {
    fn new(name: String, size_bytes: u64) -> Self {
        let url = format!("/sounds/{name}");
        Self {
            name,
            size_bytes,
            url,
        }
    }
}

/// GET /api/v1/sounds/settings
pub async fn list_settings(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SoundSetting>>>> {
    let settings = SoundSettingRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/v1/sounds/settings/{key}
pub async fn put_setting(
    State(state): State<AppState>,
    actor: Actor,
    ApiPath(key): ApiPath<String>,
    Json(input): Json<UpdateSoundSetting>,
) -> AppResult<Json<DataResponse<SoundSetting>>> {
    validate_setting_key(&key)?;
    validate_setting_value(&input.value)?;

    let setting = SoundSettingRepo::upsert(&state.pool, &key, &input.value, Utc::now()).await?;
    tracing::info!(key = %key, changed_by = %actor.name, "Sound setting updated");
    Ok(Json(DataResponse { data: setting }))
}

/// DELETE /api/v1/sounds/settings/{key}
///
/// Idempotent: deleting an unset key also returns 204.
pub async fn delete_setting(
    State(state): State<AppState>,
    actor: Actor,
    ApiPath(key): ApiPath<String>,
) -> AppResult<StatusCode> {
    validate_setting_key(&key)?;

    if SoundSettingRepo::delete(&state.pool, &key).await? {
        tracing::info!(key = %key, changed_by = %actor.name, "Sound setting removed");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/sounds/files
///
/// Supported sound files in `SOUNDS_DIR`, sorted by name. A missing
/// directory lists as empty.
pub async fn list_files(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SoundFile>>>> {
    let files = read_sound_dir(&state.config.sounds_dir)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;
    Ok(Json(DataResponse { data: files }))
}

/// POST /api/v1/sounds/files
///
/// Accepts a multipart form with a required `file` field. The file name is
/// sanitized and an existing file with the same name is replaced.
pub async fn upload_file(
    State(state): State<AppState>,
    actor: Actor,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<SoundFile>>)> {
    let mut file_data: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        file_data = Some((filename, data.to_vec()));
    }

    let (raw_name, data) =
        file_data.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    let name = sanitize_sound_filename(&raw_name)?;
    let max = state.config.max_upload_bytes;
    if data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }
    if data.len() > max {
        return Err(AppError::BadRequest(format!(
            "Uploaded file exceeds {max} bytes"
        )));
    }

    let dir = &state.config.sounds_dir;
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;
    tokio::fs::write(dir.join(&name), &data)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    tracing::info!(
        file = %name,
        size_bytes = data.len(),
        changed_by = %actor.name,
        "Sound file uploaded",
    );
    let file = SoundFile::new(name, data.len() as u64);
    Ok((StatusCode::CREATED, Json(DataResponse { data: file })))
}

// ── Private helpers ──────────────────────────────────────────────────────

async fn read_sound_dir(dir: &Path) -> std::io::Result<Vec<SoundFile>> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let metadata = entry.metadata().await?;
        if !metadata.is_file() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        // Only list names an upload could have produced.
        if sanitize_sound_filename(&name).ok().as_deref() != Some(name.as_str()) {
            continue;
        }
        files.push(SoundFile::new(name, metadata.len()));
    }
    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

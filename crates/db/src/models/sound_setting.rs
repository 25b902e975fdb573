use breaktime_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `sound_settings` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct SoundSetting {
    pub key: String,
    pub value: String,
    pub updated_at: Timestamp,
}

/// Request body for `PUT /sounds/settings/{key}`.
#[derive(Debug, Deserialize)]
pub struct UpdateSoundSetting {
    pub value: String,
}

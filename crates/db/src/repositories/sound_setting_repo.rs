//! Repository for the `sound_settings` key/value table.

use breaktime_core::types::{format_timestamp, Timestamp};
use sqlx::SqliteExecutor;

use crate::models::sound_setting::SoundSetting;

const COLUMNS: &str = "key, value, updated_at";

pub struct SoundSettingRepo;

impl SoundSettingRepo {
    /// List all settings ordered by key.
    pub async fn list<'e, E>(executor: E) -> Result<Vec<SoundSetting>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM sound_settings ORDER BY key ASC");
        sqlx::query_as::<_, SoundSetting>(&query)
            .fetch_all(executor)
            .await
    }

    pub async fn find<'e, E>(executor: E, key: &str) -> Result<Option<SoundSetting>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM sound_settings WHERE key = $1");
        sqlx::query_as::<_, SoundSetting>(&query)
            .bind(key)
            .fetch_optional(executor)
            .await
    }

    /// Insert or replace a setting value.
    pub async fn upsert<'e, E>(
        executor: E,
        key: &str,
        value: &str,
        now: Timestamp,
    ) -> Result<SoundSetting, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO sound_settings (key, value, updated_at)
             VALUES ($1, $2, $3)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SoundSetting>(&query)
            .bind(key)
            .bind(value)
            .bind(format_timestamp(&now))
            .fetch_one(executor)
            .await
    }

    /// Delete a setting. Returns `true` if a row was removed.
    pub async fn delete<'e, E>(executor: E, key: &str) -> Result<bool, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM sound_settings WHERE key = $1")
            .bind(key)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

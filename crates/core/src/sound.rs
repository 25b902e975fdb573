//! Sound notification settings and upload validation.
//!
//! Settings are flat key/value pairs (e.g. `break_start` → `gong.mp3`).
//! Uploaded files keep a sanitized basename and must carry a supported
//! audio extension.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a setting key.
pub const MAX_KEY_LEN: usize = 64;

/// Maximum length of a setting value, in bytes.
pub const MAX_VALUE_LEN: usize = 1024;

/// Maximum length of a stored sound file name.
pub const MAX_FILENAME_LEN: usize = 128;

/// Accepted sound file extensions (lowercase).
pub const SUPPORTED_SOUND_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg"];

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Keys are `[a-z0-9_.-]{1,64}`.
pub fn validate_setting_key(key: &str) -> Result<(), CoreError> {
    if key.is_empty() || key.len() > MAX_KEY_LEN {
        return Err(CoreError::Validation(format!(
            "Setting key must be 1-{MAX_KEY_LEN} characters"
        )));
    }
    if !key
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || matches!(b, b'_' | b'.' | b'-'))
    {
        return Err(CoreError::Validation(format!(
            "Setting key '{key}' may only contain a-z, 0-9, '_', '.', '-'"
        )));
    }
    Ok(())
}

pub fn validate_setting_value(value: &str) -> Result<(), CoreError> {
    if value.len() > MAX_VALUE_LEN {
        return Err(CoreError::Validation(format!(
            "Setting value exceeds {MAX_VALUE_LEN} bytes"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Uploads
// ---------------------------------------------------------------------------

/// Reduce a client-supplied file name to a safe basename with a supported extension.
///
/// Path components are dropped, disallowed characters become `_`, and the
/// extension is lowercased. Names that end up empty, hidden, or without a
/// supported extension are rejected.
pub fn sanitize_sound_filename(raw: &str) -> Result<String, CoreError> {
    let basename = raw.rsplit(['/', '\\']).next().unwrap_or_default().trim();

    let (stem, ext) = basename.rsplit_once('.').ok_or_else(|| {
        CoreError::Validation(format!("Sound file '{basename}' has no extension"))
    })?;

    let ext = ext.to_ascii_lowercase();
    if !SUPPORTED_SOUND_EXTENSIONS.contains(&ext.as_str()) {
        return Err(CoreError::Validation(format!(
            "Unsupported sound format '.{ext}'. Supported: {}",
            SUPPORTED_SOUND_EXTENSIONS.join(", ")
        )));
    }

    let stem: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if stem.is_empty() || stem.starts_with('.') {
        return Err(CoreError::Validation("Sound file name is empty".into()));
    }

    let name = format!("{stem}.{ext}");
    if name.len() > MAX_FILENAME_LEN {
        return Err(CoreError::Validation(format!(
            "Sound file name exceeds {MAX_FILENAME_LEN} characters"
        )));
    }
    Ok(name)
}

use chrono::SecondsFormat;

/// All database primary keys are SQLite INTEGER rowids.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Render a timestamp as fixed-width RFC 3339 text (microsecond precision, `Z` suffix).
///
/// Fixed width keeps lexical order identical to chronological order, which the
/// revision history relies on for `ORDER BY changed_at`.
pub fn format_timestamp(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

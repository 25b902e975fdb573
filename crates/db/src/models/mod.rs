//! Row models for the `breaks`, `break_revisions` and `sound_settings` tables.

pub mod break_entry;
pub mod break_revision;
pub mod sound_setting;

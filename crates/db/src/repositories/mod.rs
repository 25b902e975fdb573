//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods that
//! accept any SQLite executor as the first argument: `&DbPool` for standalone
//! reads, `&mut *tx` when composed inside a [`crate::BreakStore`] transaction.

pub mod break_repo;
pub mod break_revision_repo;
pub mod sound_setting_repo;

pub use break_repo::BreakRepo;
pub use break_revision_repo::BreakRevisionRepo;
pub use sound_setting_repo::SoundSettingRepo;

//! Breaktime domain core.
//!
//! Pure logic with no I/O: identifiers, error taxonomy, time-of-day parsing
//! and the overlap rule, revision change types, the bootstrap file model and
//! sound-setting validation. Shared by the db and api crates.

pub mod bootstrap;
pub mod error;
pub mod schedule;
pub mod sound;
pub mod time_of_day;
pub mod types;

pub mod app_config;
pub mod breaks;
pub mod revisions;
pub mod sounds;
pub mod time;

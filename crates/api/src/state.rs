use std::sync::Arc;

use breaktime_db::BreakStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, used for reads outside the break store.
    pub pool: breaktime_db::DbPool,
    /// The single writer for break data, shared by every request task.
    pub store: BreakStore,
    pub config: Arc<ServerConfig>,
}

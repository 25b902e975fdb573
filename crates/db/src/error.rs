use breaktime_core::error::CoreError;

/// Error returned by [`crate::BreakStore`] operations.
///
/// Domain failures arrive as [`StoreError::Core`] (`Validation`, `NotFound`).
/// Every other variant is an internal fault: the operation was rolled back
/// and the caller should report a generic server error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed bootstrap file: {0}")]
    Bootstrap(#[from] serde_json::Error),
}

impl StoreError {
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Core(CoreError::Validation(_)))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Core(CoreError::NotFound { .. }))
    }
}

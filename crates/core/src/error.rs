use crate::types::DbId;

/// Domain errors shared by the store and the HTTP layer.
///
/// `Validation` and `NotFound` are always user-correctable and never leave
/// partial state behind. `Internal` is reserved for invariant breaks detected
/// in domain code; persistence faults are carried by the db crate's own error.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

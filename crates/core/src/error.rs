use crate::types::DbId;

/// Domain-level error type.
///
/// Absent records are not errors anywhere in the progress logic -- a missing
/// completion record simply reads as `Pending`. `NotFound` exists for the
/// entity lookups the HTTP layer performs (staff members, assignable items).
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Malformed call parameters or request payload.
    #[error("{0}")]
    Validation(String),
}

use crate::offer::OfferStatus;
use crate::types::DbId;

/// Domain-level failure shared by every layer of the service.
///
/// Each variant maps to exactly one HTTP status in the API crate, so the
/// variant chosen here is the contract the client sees.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// The listing exists but is not open for new offers.
    #[error("Unavailable: {0}")]
    Unavailable(String),

    /// The requested offer status change is not permitted from the current state.
    #[error("Invalid transition: offer cannot move from {from} to {to}")]
    InvalidTransition { from: OfferStatus, to: OfferStatus },

    /// A status change named a status that does not exist.
    #[error("Invalid transition: unknown offer status '{0}'")]
    UnknownStatus(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

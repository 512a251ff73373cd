use thiserror::Error;

/// Errors that can occur during buyer operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuyerError {
    #[error("Buyer not found: {0}")]
    NotFound(String),

    #[error("Buyer validation error: {0}")]
    ValidationError(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

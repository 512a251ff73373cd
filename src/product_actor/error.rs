use crate::inventory::InventoryError;
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Brand and model name are required")]
    InvalidName,

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

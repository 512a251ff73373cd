use crate::model::{AddressId, BuyerId};
use thiserror::Error;

/// Errors from resolving or storing a shipping target.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ShippingError {
    #[error("Missing address fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Address not found: {0}")]
    NotFound(String),

    #[error("Address {address} does not belong to {buyer}")]
    NotOwned { address: AddressId, buyer: BuyerId },

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

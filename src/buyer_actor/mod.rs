//! Buyer directory. Checkout only needs it for ownership checks and contact
//! details when notifying.

mod entity;
mod error;

pub use error::*;

use crate::clients::BuyerClient;
use crate::model::Buyer;
use resource_actor::ResourceActor;

/// Creates a new Buyer actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Buyer>, BuyerClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, BuyerClient::new(generic_client))
}

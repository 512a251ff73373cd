//! Shipping addresses. The client side implements the shipping collaborator.

mod entity;
mod error;

pub use error::*;

use crate::clients::AddressClient;
use crate::model::Address;
use resource_actor::ResourceActor;

/// Creates a new Address actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Address>, AddressClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, AddressClient::new(generic_client))
}

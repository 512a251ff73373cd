//! Catalog and stock actor.
//!
//! Each [`Product`] owns its [`InventoryRecord`](crate::inventory::InventoryRecord);
//! the ledger operations are custom actions, so a check-and-reserve on one
//! product can never interleave with another request for the same product.

mod actions;
mod entity;
mod error;

pub use actions::*;
pub use error::*;

use crate::clients::ProductClient;
use crate::model::Product;
use resource_actor::ResourceActor;

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, ProductClient::new(generic_client))
}

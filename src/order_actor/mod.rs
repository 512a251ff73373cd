//! The Order Aggregate actor.
//!
//! Orders are created in one message together with all their lines, and after
//! that only change through [`OrderAction`]s. The actor's context is the buyer
//! client, used to refuse orders for buyers that do not exist.

mod actions;
mod entity;
mod error;

pub use actions::*;
pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use resource_actor::ResourceActor;

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(generic_client))
}

//! Contracts the checkout core consumes from the rest of the store.
//!
//! Each is a small trait so the orchestrator can be handed a real actor-backed
//! implementation or a test double.

mod cart;
mod catalog;
mod notifications;
mod shipping;

pub use cart::*;
pub use catalog::*;
pub use notifications::*;
pub use shipping::*;

//! Type-safe wrappers around [`ResourceClient`](resource_actor::ResourceClient).
//!
//! Each client turns [`FrameworkError`](resource_actor::FrameworkError) back into
//! its resource's own error enum, so business errors keep their type across the
//! actor boundary.

pub mod address_client;
pub mod buyer_client;
pub mod order_client;
pub mod product_client;

pub use address_client::*;
pub use buyer_client::*;
pub use order_client::*;
pub use product_client::*;

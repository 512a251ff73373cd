//! Plain data shared by the actors, the builder and the checkout service.

pub mod address;
pub mod buyer;
pub mod cart;
pub mod order;
pub mod order_status;
pub mod product;

pub use address::*;
pub use buyer::*;
pub use cart::*;
pub use order::*;
pub use order_status::*;
pub use product::*;

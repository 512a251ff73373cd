//! Starting, wiring and stopping the store's actors.

mod store_system;
pub mod tracing;

pub use self::tracing::setup_tracing;
pub use store_system::*;

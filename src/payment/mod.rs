//! # Payment Strategy Registry
//!
//! Checkout never names a concrete payment method. It asks the
//! [`PaymentRegistry`] for the strategy registered under the order's method key
//! and talks to it through [`PaymentStrategy`]. New methods are added with
//! [`PaymentRegistry::register`]; nothing else changes.
//!
//! The built-in strategies are simulations with fixed outcomes: cards are
//! approved, bank transfers and wallets come back pending. In
//! [`PaymentMode::Live`] the built-ins are replaced by a gateway stub that
//! refuses to process, since no real gateway is wired in.

mod error;
mod payload;
mod registry;
mod strategies;

pub use error::*;
pub use payload::*;
pub use registry::*;
pub use strategies::*;

#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # CellHub Checkout
//!
//! > **Order creation and payment settlement for a mobile-phone store.**
//!
//! This crate turns a buyer's cart into a persisted order, holds stock for it,
//! dispatches payment to a pluggable strategy and keeps the order's status in
//! step with the payment outcome, including when concurrent checkouts race for
//! the last unit of a product.
//!
//! ## 🏗️ Design
//!
//! Every stateful resource (products with their stock, orders, buyers,
//! addresses) lives in its own [`resource_actor::ResourceActor`]: one Tokio task
//! that owns all entities of that type and applies requests one at a time. A
//! "check availability, then reserve" sent to the product actor is therefore a
//! single critical section. Two checkouts can both pass the pre-flight check,
//! but only one of them can win the reservation.
//!
//! ### Error Handling
//! Each actor has its own error enum that survives the channel hop
//! ([`FrameworkError::downcast_entity`](resource_actor::FrameworkError::downcast_entity)).
//! The orchestrator flattens them into [`checkout::CheckoutError`], which
//! separates business rejections from infrastructure failures.
//!
//! ### Context Injection
//! The order actor receives the buyer client at `run()` time and uses it to
//! refuse orders for unknown buyers.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. Data ([`model`], [`inventory`])
//! Plain types plus the Inventory Ledger rules and the order status table.
//!
//! ### 2. Actors ([`product_actor`], [`order_actor`], [`buyer_actor`], [`address_actor`])
//! `ActorEntity` implementations. Their clients live in [`clients`].
//!
//! ### 3. Payments ([`payment`])
//! `PaymentStrategy`, the five built-in simulated methods and the
//! `PaymentRegistry` that maps a method key to a strategy factory.
//!
//! ### 4. Orchestration ([`builder`], [`checkout`], [`collaborators`])
//! The `OrderBuilder` draft, the `CheckoutService`, and the cart, catalog,
//! shipping and notification contracts it depends on.
//!
//! ### 5. Runtime ([`config`], [`lifecycle`])
//! `StoreConfig::from_env`, `StoreSystem` wiring and `setup_tracing`.
//!
//! ## 🚀 Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! CELLHUB_PAYMENT_MODE=live RUST_LOG=info cargo run   # gateway stub refuses payments
//! ```

pub mod address_actor;
pub mod builder;
pub mod buyer_actor;
pub mod checkout;
pub mod clients;
pub mod collaborators;
pub mod config;
pub mod inventory;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod payment;
pub mod product_actor;

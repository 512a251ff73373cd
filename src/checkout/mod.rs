//! # Checkout Orchestrator
//!
//! Turns a cart into a persisted order and settles its payment.
//!
//! ```text
//! cart ──► shipping target ──► pre-flight (catalog + stock) ──► OrderBuilder::build
//!                                                                  │
//!                        clear cart ◄──────────────────────────────┘
//!                            │
//!                            ▼ (optional)
//!   claim ──► strategy.process ──► reserve all lines ──► record settlement
//!                                                              │
//!                                                    notify (spawned)
//! ```
//!
//! Only the steps before `build` run under the checkout timeout, and only
//! `strategy.process` under the settlement timeout. The claim keeps a second
//! settlement of the same order out until the first records its outcome.
//!
//! Everything up to `build` either completes or leaves nothing behind. Once the
//! order exists, a failed payment never removes it: the order stays `pending`
//! with a rejection reason so the buyer can retry with
//! [`CheckoutService::confirm_payment`].

mod error;
mod service;

pub use error::*;
pub use service::*;

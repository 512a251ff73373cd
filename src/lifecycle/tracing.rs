//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a `tracing-subscriber` fmt subscriber. The level
//! comes from `RUST_LOG`; the format is compact and hides module paths, since
//! actor events already carry an `entity_type` field.
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=debug cargo run                        # full payloads at entry points
//! RUST_LOG=cellhub_checkout::checkout=debug cargo run
//! ```
//!
//! A checkout with immediate card payment at `info` looks like this:
//!
//! ```text
//! INFO checkout:create_order: Order persisted order_id=order_1
//! INFO checkout: Order placed order_id=order_1 total=1799800
//! INFO checkout: Payment processed order_id=order_1 status=approved transaction_id=CC-4242
//! INFO checkout:reserve_lines: All lines reserved
//! INFO checkout: Notification sent channel="email" to="ana@cellhub.co"
//! ```
//!
//! Actor loops log every request with `entity_type` and `id`, so
//! `RUST_LOG=debug` also shows each `Action` the product actor applied, which is
//! where stock races become visible.

/// Installs the global subscriber. Later calls are no-ops, so tests may call it
/// freely.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init()
        .ok();
}

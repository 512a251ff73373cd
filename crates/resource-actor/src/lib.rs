//! # Resource Actors
//!
//! Building blocks for the store's stateful resources (products and their stock,
//! orders, buyers, addresses). Each resource type lives inside one
//! [`ResourceActor`], a Tokio task that owns every entity of that type and applies
//! requests to them **one at a time**.
//!
//! That sequential loop is the concurrency story of the whole checkout core: a
//! "check availability, then reserve" action sent to the product actor can never
//! interleave with another checkout's action on the same record, so there is no
//! lost update and no oversell, without any lock in domain code.
//!
//! ## Pieces
//!
//! - [`ActorEntity`] - contract a resource implements (create/update/delete hooks and
//!   a custom `Action` handler).
//! - [`ResourceActor`] - the server half; owns the store and the receive loop.
//! - [`ResourceClient`] - the cloneable sender half used by domain clients.
//! - [`ActorClient`] - provided `get`/`list`/`delete` for domain client wrappers.
//! - [`FrameworkError`] - channel failures plus the entity's own typed error.
//! - [`mock`] - an in-memory stand-in for an actor, for client-level tests.
//!
//! ## Wiring
//!
//! ```rust,ignore
//! let (actor, client) = ResourceActor::<Product>::new(32);
//! tokio::spawn(actor.run(()));
//! let id = client.create(params).await?;
//! ```

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};

//! The contract every store resource implements.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that a resource must implement to be managed by a
/// [`ResourceActor`](crate::ResourceActor).
///
/// All hooks run inside the actor's loop, so they observe and mutate the entity
/// with exclusive access. A hook that fails leaves the stored entity as it was
/// before the request for `create`/`delete`; `on_update` and `handle_action` must
/// only mutate `self` once they know they will succeed.
///
/// # Context
/// `Context` is handed to [`ResourceActor::run`](crate::ResourceActor::run) and
/// passed to every hook. Use `()` when the entity needs nothing.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Identifier; generated by the actor from a `u32` counter.
    type Id: Eq + Hash + Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload used to create an instance.
    type Create: Send + Sync + Debug;

    /// Payload used to update an instance.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations (e.g. `Reserve` on a product's stock).
    type Action: Send + Sync + Debug;

    /// Result returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected at `run()` time.
    type Context: Send + Sync;

    /// One error enum per resource, shared by all hooks and actions.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the entity from its generated id and the create payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Runs after construction and before the entity is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies an update payload.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Runs before the entity is removed; an error vetoes the removal.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handles a custom action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}

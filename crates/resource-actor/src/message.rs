//! Requests sent from a [`ResourceClient`](crate::ResourceClient) to its actor.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// One-shot channel the actor answers on.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// CRUD requests plus `List` and the resource-specific `Action`.
///
/// The payload types come from [`ActorEntity`], so an order payload can never
/// reach the product actor.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

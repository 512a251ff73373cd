use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Provided read/delete operations for domain clients that wrap a
/// [`ResourceClient`].
///
/// A domain client only supplies `inner()` and `map_error()`; `map_error` is the
/// place to recover the entity's typed error with
/// [`FrameworkError::downcast_entity`].
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    fn inner(&self) -> &ResourceClient<T>;

    fn map_error(e: FrameworkError) -> Self::Error;

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}

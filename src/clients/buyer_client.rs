use crate::buyer_actor::BuyerError;
use crate::model::{Buyer, BuyerCreate, BuyerId, BuyerUpdate};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Buyer actor.
#[derive(Clone)]
pub struct BuyerClient {
    inner: ResourceClient<Buyer>,
}

impl BuyerClient {
    pub fn new(inner: ResourceClient<Buyer>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_buyer(&self, params: BuyerCreate) -> Result<BuyerId, BuyerError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_buyer(&self, id: BuyerId, update: BuyerUpdate) -> Result<Buyer, BuyerError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Buyer> for BuyerClient {
    type Error = BuyerError;

    fn inner(&self) -> &ResourceClient<Buyer> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> BuyerError {
        match e {
            FrameworkError::NotFound(id) => BuyerError::NotFound(id),
            other => other
                .downcast_entity::<BuyerError>()
                .unwrap_or_else(|e| BuyerError::ActorCommunicationError(e.to_string())),
        }
    }
}

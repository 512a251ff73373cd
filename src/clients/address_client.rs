use crate::address_actor::ShippingError;
use crate::collaborators::{ResolvedAddress, ShippingDirectory};
use crate::model::{Address, AddressCreate, AddressId, BuyerId, ShippingTarget};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument};

/// Client for interacting with the Address actor.
#[derive(Clone)]
pub struct AddressClient {
    inner: ResourceClient<Address>,
}

impl AddressClient {
    pub fn new(inner: ResourceClient<Address>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_address(&self, params: AddressCreate) -> Result<AddressId, ShippingError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// A buyer's saved addresses, provisional ones excluded.
    #[instrument(skip(self))]
    pub async fn addresses_for(&self, buyer: BuyerId) -> Result<Vec<Address>, ShippingError> {
        let all = self.list().await?;
        Ok(all
            .into_iter()
            .filter(|a| a.buyer_id == buyer && !a.provisional)
            .collect())
    }
}

#[async_trait]
impl ActorClient<Address> for AddressClient {
    type Error = ShippingError;

    fn inner(&self) -> &ResourceClient<Address> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> ShippingError {
        match e {
            FrameworkError::NotFound(id) => ShippingError::NotFound(id),
            other => other
                .downcast_entity::<ShippingError>()
                .unwrap_or_else(|e| ShippingError::ActorCommunicationError(e.to_string())),
        }
    }
}

#[async_trait]
impl ShippingDirectory for AddressClient {
    #[instrument(skip(self, target))]
    async fn resolve(
        &self,
        buyer: BuyerId,
        target: ShippingTarget,
    ) -> Result<ResolvedAddress, ShippingError> {
        match target {
            ShippingTarget::Existing(id) => {
                let address = self
                    .get(id)
                    .await?
                    .ok_or_else(|| ShippingError::NotFound(id.to_string()))?;
                if address.buyer_id != buyer {
                    return Err(ShippingError::NotOwned { address: id, buyer });
                }
                Ok(ResolvedAddress {
                    id,
                    provisional: false,
                })
            }
            ShippingTarget::Provisional(fields) => {
                let missing = fields.missing_fields();
                if !missing.is_empty() {
                    return Err(ShippingError::MissingFields(
                        missing.into_iter().map(String::from).collect(),
                    ));
                }
                let id = self.create_address(fields.into_create(buyer)).await?;
                info!(%id, %buyer, "Provisional address created");
                Ok(ResolvedAddress {
                    id,
                    provisional: true,
                })
            }
        }
    }

    #[instrument(skip(self))]
    async fn discard_provisional(&self, id: AddressId) -> Result<(), ShippingError> {
        self.delete(id).await
    }
}

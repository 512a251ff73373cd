use crate::collaborators::{Catalog, CatalogEntry};
use crate::inventory::InventoryRecord;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use rust_decimal::Decimal;
use tracing::{debug, error, info, instrument, warn};

/// Client for interacting with the Product actor.
///
/// Besides catalog maintenance this is the Inventory Ledger's public face:
/// every stock movement is one action, applied atomically by the actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn reprice(&self, id: ProductId, price: Decimal) -> Result<Product, ProductError> {
        self.update_product(
            id,
            ProductUpdate {
                price: Some(price),
                ..Default::default()
            },
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn set_active(&self, id: ProductId, active: bool) -> Result<Product, ProductError> {
        self.update_product(
            id,
            ProductUpdate {
                active: Some(active),
                ..Default::default()
            },
        )
        .await
    }

    async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn check_availability(&self, id: ProductId, quantity: u32) -> Result<bool, ProductError> {
        match self.act(id, ProductAction::CheckAvailability(quantity)).await? {
            ProductActionResult::CheckAvailability(ok) => Ok(ok),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn reserve(&self, id: ProductId, quantity: u32) -> Result<InventoryRecord, ProductError> {
        match self.act(id, ProductAction::Reserve(quantity)).await? {
            ProductActionResult::Reserve(record) => Ok(record),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn release(&self, id: ProductId, quantity: u32) -> Result<InventoryRecord, ProductError> {
        match self.act(id, ProductAction::Release(quantity)).await? {
            ProductActionResult::Release(record) => Ok(record),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn add_stock(&self, id: ProductId, quantity: u32) -> Result<InventoryRecord, ProductError> {
        match self.act(id, ProductAction::AddStock(quantity)).await? {
            ProductActionResult::AddStock(record) => Ok(record),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn inventory(&self, id: ProductId) -> Result<InventoryRecord, ProductError> {
        match self.act(id, ProductAction::Snapshot).await? {
            ProductActionResult::Snapshot(record) => Ok(record),
            other => Err(unexpected(other)),
        }
    }

    /// Reserves every line or none of them.
    ///
    /// When line `k` cannot be reserved, lines `0..k` are released before the
    /// error from line `k` is returned.
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn reserve_lines(&self, lines: &[(ProductId, u32)]) -> Result<(), ProductError> {
        for (done, &(product, quantity)) in lines.iter().enumerate() {
            if let Err(e) = self.reserve(product, quantity).await {
                warn!(%product, quantity, error = %e, "Reservation failed, rolling back");
                self.release_lines(&lines[..done]).await;
                return Err(e);
            }
        }
        info!("All lines reserved");
        Ok(())
    }

    /// Hands reserved stock back. Keeps going past failures, which are logged
    /// since there is no one left to report them to.
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn release_lines(&self, lines: &[(ProductId, u32)]) -> bool {
        let mut clean = true;
        for &(product, quantity) in lines {
            if let Err(e) = self.release(product, quantity).await {
                error!(%product, quantity, error = %e, "Failed to release reserved stock");
                clean = false;
            }
        }
        clean
    }

    async fn act(&self, id: ProductId, action: ProductAction) -> Result<ProductActionResult, ProductError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }
}

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("unexpected action result: {result:?}"))
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> ProductError {
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            other => other
                .downcast_entity::<ProductError>()
                .unwrap_or_else(|e| ProductError::ActorCommunicationError(e.to_string())),
        }
    }
}

#[async_trait]
impl Catalog for ProductClient {
    async fn lookup(&self, id: ProductId) -> Result<Option<CatalogEntry>, ProductError> {
        Ok(self.get(id).await?.map(|p| CatalogEntry {
            id: p.id,
            name: p.name(),
            price: p.price,
            active: p.active,
        }))
    }
}

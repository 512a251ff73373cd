use crate::model::{BuyerId, Order, OrderCreate, OrderId, OrderStatus};
use crate::order_actor::{OrderAction, OrderError};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use std::cmp::Reverse;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
///
/// Buyer validation happens in the Order actor's `on_create` hook.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Persists an order and all of its lines in one step.
    #[instrument(skip(self, params), fields(buyer_id = %params.buyer_id, lines = params.lines.len()))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!("Sending request");
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(order_id = %id, "Order persisted");
        Ok(id)
    }

    /// Like `get`, but a missing order is an error.
    pub async fn order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn transition(
        &self,
        id: OrderId,
        expected: Option<OrderStatus>,
        target: OrderStatus,
    ) -> Result<Order, OrderError> {
        self.act(id, OrderAction::Transition { expected, target }).await
    }

    /// Claims a `pending` order for settlement. A second claim fails with
    /// `SettlementInProgress` until the first records its outcome.
    #[instrument(skip(self))]
    pub async fn begin_settlement(&self, id: OrderId) -> Result<Order, OrderError> {
        self.act(id, OrderAction::BeginSettlement).await
    }

    #[instrument(skip(self))]
    pub async fn abandon_settlement(&self, id: OrderId) -> Result<Order, OrderError> {
        self.act(id, OrderAction::AbandonSettlement).await
    }

    #[instrument(skip(self))]
    pub async fn record_settlement(
        &self,
        id: OrderId,
        transaction_id: String,
        confirm: bool,
        reserved_now: bool,
    ) -> Result<Order, OrderError> {
        self.act(
            id,
            OrderAction::RecordSettlement {
                transaction_id,
                confirm,
                reserved_now,
            },
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn record_rejection(&self, id: OrderId, reason: String) -> Result<Order, OrderError> {
        self.act(id, OrderAction::RecordRejection(reason)).await
    }

    #[instrument(skip(self))]
    pub async fn mark_stock_released(&self, id: OrderId) -> Result<Order, OrderError> {
        self.act(id, OrderAction::MarkStockReleased).await
    }

    /// A buyer's orders, newest first.
    #[instrument(skip(self))]
    pub async fn orders_for_buyer(&self, buyer: BuyerId) -> Result<Vec<Order>, OrderError> {
        let mut orders: Vec<Order> = self
            .list()
            .await?
            .into_iter()
            .filter(|o| o.buyer_id == buyer)
            .collect();
        orders.sort_by_key(|o| (Reverse(o.created_at), Reverse(o.id)));
        Ok(orders)
    }

    async fn act(&self, id: OrderId, action: OrderAction) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> OrderError {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => other
                .downcast_entity::<OrderError>()
                .unwrap_or_else(|e| OrderError::ActorCommunicationError(e.to_string())),
        }
    }
}

use super::{OrderAction, OrderError};
use crate::clients::BuyerClient;
use crate::model::{Order, OrderCreate, OrderId};
use async_trait::async_trait;
use resource_actor::{ActorClient, ActorEntity};
use tracing::debug;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = BuyerClient;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        Order::new(id, params)
    }

    /// Refuses orders for buyers the directory does not know.
    async fn on_create(&mut self, buyers: &BuyerClient) -> Result<(), OrderError> {
        debug!(order_id = %self.id, buyer_id = %self.buyer_id, "Validating buyer");
        match buyers.get(self.buyer_id).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(OrderError::UnknownBuyer(self.buyer_id)),
            Err(e) => Err(OrderError::ActorCommunicationError(e.to_string())),
        }
    }

    /// Orders are not edited; they move through actions.
    async fn on_update(&mut self, _update: (), _ctx: &BuyerClient) -> Result<(), OrderError> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &BuyerClient,
    ) -> Result<Order, OrderError> {
        match action {
            OrderAction::Transition { expected, target } => self.transition(expected, target)?,
            OrderAction::BeginSettlement => self.begin_settlement()?,
            OrderAction::AbandonSettlement => self.abandon_settlement(),
            OrderAction::RecordSettlement {
                transaction_id,
                confirm,
                reserved_now,
            } => self.record_settlement(transaction_id, confirm, reserved_now)?,
            OrderAction::RecordRejection(reason) => self.record_rejection(reason),
            OrderAction::MarkStockReleased => self.mark_stock_released(),
        }
        Ok(self.clone())
    }
}

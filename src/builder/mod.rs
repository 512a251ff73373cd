//! # Order Builder
//!
//! Accumulates a draft order and only persists it once the draft is complete.
//! The set of acceptable payment methods comes from the same
//! [`PaymentRegistry`] checkout uses to settle, so the two cannot drift apart.
//!
//! ```rust,ignore
//! let order = OrderBuilder::new(buyer_id, registry)
//!     .add_item(phone_a, 2, dec!(100))?
//!     .add_item(phone_b, 1, dec!(50))?
//!     .set_shipping_target(address_id)
//!     .set_payment_method("pse")?
//!     .add_notes("Leave at reception")
//!     .build(&orders)
//!     .await?;
//! assert_eq!(order.total(), dec!(250));
//! ```

use crate::clients::OrderClient;
use crate::model::{AddressId, BuyerId, Order, OrderCreate, OrderLine, ProductId};
use crate::order_actor::OrderError;
use crate::payment::PaymentRegistry;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, instrument};

/// A draft order. Nothing is stored until [`build`](Self::build) succeeds.
#[derive(Clone)]
pub struct OrderBuilder {
    buyer_id: BuyerId,
    registry: Arc<PaymentRegistry>,
    lines: Vec<OrderLine>,
    shipping_address: Option<AddressId>,
    payment_method: Option<String>,
    notes: String,
}

impl OrderBuilder {
    pub fn new(buyer_id: BuyerId, registry: Arc<PaymentRegistry>) -> Self {
        Self {
            buyer_id,
            registry,
            lines: Vec::new(),
            shipping_address: None,
            payment_method: None,
            notes: String::new(),
        }
    }

    /// Appends a line. Quantity and unit price must both be positive.
    pub fn add_item(
        mut self,
        product_id: ProductId,
        quantity: u32,
        unit_price: Decimal,
    ) -> Result<Self, OrderError> {
        if quantity == 0 || unit_price <= Decimal::ZERO {
            return Err(OrderError::InvalidLineItem {
                product: product_id,
                quantity,
                unit_price,
            });
        }
        self.lines.push(OrderLine {
            product_id,
            quantity,
            unit_price,
        });
        Ok(self)
    }

    pub fn set_shipping_target(mut self, address: AddressId) -> Self {
        self.shipping_address = Some(address);
        self
    }

    /// Accepts only methods the payment registry currently supports.
    pub fn set_payment_method(mut self, method: impl Into<String>) -> Result<Self, OrderError> {
        let method = method.into();
        if !self.registry.supports(&method) {
            return Err(OrderError::InvalidPaymentMethod {
                method,
                supported: self.registry.supported_methods(),
            });
        }
        self.payment_method = Some(method);
        Ok(self)
    }

    pub fn add_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Checks the draft is complete and turns it into a create payload.
    pub fn into_create(self) -> Result<OrderCreate, OrderError> {
        if self.lines.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        let shipping_address = self
            .shipping_address
            .ok_or(OrderError::MissingShippingTarget)?;
        let payment_method = self.payment_method.ok_or(OrderError::MissingPaymentMethod)?;
        Ok(OrderCreate {
            buyer_id: self.buyer_id,
            shipping_address,
            payment_method,
            notes: self.notes,
            lines: self.lines,
        })
    }

    /// Persists the order with its lines as one unit and returns it, `pending`.
    #[instrument(skip(self, orders), fields(buyer_id = %self.buyer_id, lines = self.lines.len()))]
    pub async fn build(self, orders: &OrderClient) -> Result<Order, OrderError> {
        let params = self.into_create()?;
        debug!(?params, "Draft complete");
        let id = orders.create_order(params).await?;
        orders.order(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{order_total, OrderStatus};
    use crate::order_actor;
    use crate::payment::PaymentMode;
    use proptest::prelude::*;
    use resource_actor::mock::MockClient;
    use resource_actor::ActorEntity;
    use rust_decimal_macros::dec;

    fn registry() -> Arc<PaymentRegistry> {
        Arc::new(PaymentRegistry::with_builtin(PaymentMode::Simulated))
    }

    fn complete_draft() -> OrderBuilder {
        OrderBuilder::new(BuyerId(1), registry())
            .add_item(ProductId(1), 2, dec!(100))
            .unwrap()
            .add_item(ProductId(2), 1, dec!(50))
            .unwrap()
            .set_shipping_target(AddressId(3))
            .set_payment_method("pse")
            .unwrap()
    }

    #[test]
    fn rejects_bad_lines() {
        let draft = OrderBuilder::new(BuyerId(1), registry());
        assert!(matches!(
            draft.clone().add_item(ProductId(1), 0, dec!(10)),
            Err(OrderError::InvalidLineItem { quantity: 0, .. })
        ));
        assert!(matches!(
            draft.add_item(ProductId(1), 1, dec!(0)),
            Err(OrderError::InvalidLineItem { .. })
        ));
    }

    #[test]
    fn rejects_methods_the_registry_does_not_know() {
        let err = OrderBuilder::new(BuyerId(1), registry())
            .set_payment_method("paypal")
            .err()
            .unwrap();
        let OrderError::InvalidPaymentMethod { method, supported } = err else {
            panic!("expected InvalidPaymentMethod");
        };
        assert_eq!(method, "paypal");
        assert_eq!(supported.len(), 5);
    }

    #[test]
    fn accepts_methods_registered_later() {
        let registry = registry();
        registry.register("transfer", || Box::new(crate::payment::Pse));
        assert!(OrderBuilder::new(BuyerId(1), registry)
            .set_payment_method("transfer")
            .is_ok());
    }

    #[test]
    fn incomplete_drafts_name_what_is_missing() {
        let empty = OrderBuilder::new(BuyerId(1), registry());
        assert_eq!(empty.into_create().unwrap_err(), OrderError::EmptyOrder);

        let no_address = OrderBuilder::new(BuyerId(1), registry())
            .add_item(ProductId(1), 1, dec!(1))
            .unwrap();
        assert_eq!(
            no_address.into_create().unwrap_err(),
            OrderError::MissingShippingTarget
        );

        let no_method = OrderBuilder::new(BuyerId(1), registry())
            .add_item(ProductId(1), 1, dec!(1))
            .unwrap()
            .set_shipping_target(AddressId(1));
        assert_eq!(no_method.into_create().unwrap_err(), OrderError::MissingPaymentMethod);
    }

    #[tokio::test]
    async fn build_persists_and_returns_pending_order() {
        let draft = complete_draft().add_notes("Call before delivery");
        let params = draft.clone().into_create().unwrap();
        let stored = Order::from_create_params(crate::model::OrderId(7), params).unwrap();

        let mut mock = MockClient::<Order>::new();
        mock.expect_create().return_ok(crate::model::OrderId(7));
        mock.expect_get(crate::model::OrderId(7)).return_ok(Some(stored));
        let orders = OrderClient::new(mock.client());

        let order = draft.build(&orders).await.unwrap();
        assert_eq!(order.total(), dec!(250));
        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.notes, "Call before delivery");
        let prices: Vec<Decimal> = order.lines().iter().map(|l| l.unit_price).collect();
        assert_eq!(prices, vec![dec!(100), dec!(50)]);
        mock.verify();
    }

    #[tokio::test]
    async fn build_against_real_actor_rejects_unknown_buyer() {
        let (buyer_actor, buyers) = crate::buyer_actor::new(8);
        let (order_actor, orders) = order_actor::new(8);
        tokio::spawn(buyer_actor.run(()));
        tokio::spawn(order_actor.run(buyers));

        let err = complete_draft().build(&orders).await.unwrap_err();
        assert_eq!(err, OrderError::UnknownBuyer(BuyerId(1)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        #[test]
        fn total_is_the_exact_sum_of_lines(
            lines in prop::collection::vec((1u32..=50, 1i64..=10_000_000, 0u32..=2), 1..12)
        ) {
            let mut draft = OrderBuilder::new(BuyerId(1), registry());
            let mut expected = Decimal::ZERO;
            for (i, (quantity, minor_units, scale)) in lines.iter().enumerate() {
                let unit_price = Decimal::new(*minor_units, *scale);
                expected += unit_price * Decimal::from(*quantity);
                draft = draft.add_item(ProductId(i as u32 + 1), *quantity, unit_price).unwrap();
            }
            let params = draft
                .set_shipping_target(AddressId(1))
                .set_payment_method("nequi")
                .unwrap()
                .into_create()
                .unwrap();

            prop_assert_eq!(order_total(&params.lines), expected);
            let order = Order::new(crate::model::OrderId(1), params).unwrap();
            prop_assert_eq!(order.total(), expected);
        }
    }
}

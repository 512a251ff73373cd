use super::CheckoutError;
use crate::builder::OrderBuilder;
use crate::clients::{BuyerClient, OrderClient, ProductClient};
use crate::collaborators::{
    CartStore, Catalog, OrderNotifications, ResolvedAddress, ShippingDirectory,
};
use crate::model::{
    AddressId, Buyer, BuyerId, CartLine, Order, OrderId, OrderStatus, ProductId, ShippingTarget,
};
use crate::payment::{PaymentPayload, PaymentRegistry, PaymentResult, PaymentStatus, PaymentStrategy};
use resource_actor::ActorClient;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument, warn, Instrument};

/// One checkout attempt.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub buyer: BuyerId,
    pub shipping: ShippingTarget,
    pub payment_method: String,
    pub notes: String,
    /// Settle immediately with this payload; `None` defers payment to
    /// [`CheckoutService::confirm_payment`].
    pub settlement: Option<PaymentPayload>,
}

impl CheckoutRequest {
    pub fn new(buyer: BuyerId, shipping: ShippingTarget, payment_method: impl Into<String>) -> Self {
        Self {
            buyer,
            shipping,
            payment_method: payment_method.into(),
            notes: String::new(),
            settlement: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn settle_with(mut self, payload: PaymentPayload) -> Self {
        self.settlement = Some(payload);
        self
    }
}

/// An order together with the payment that settled it.
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub order: Order,
    pub payment: PaymentResult,
}

/// What happened to payment during a checkout.
#[derive(Debug, Clone, PartialEq)]
pub enum SettlementOutcome {
    /// No payload was given.
    Deferred,
    /// The strategy ran; its status may still be `Rejected`.
    Settled(PaymentResult),
    /// Payment could not be completed. The order exists and stays `pending`.
    Failed(CheckoutError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutOutcome {
    pub order: Order,
    pub payment: SettlementOutcome,
}

#[derive(Debug, Clone, Copy)]
enum Notice {
    Confirmed,
    Shipped,
}

/// How far the pre-persistence phase got, for compensation.
#[derive(Default)]
struct Progress {
    address: Option<ResolvedAddress>,
    submitted: bool,
}

/// The checkout orchestrator.
#[derive(Clone)]
pub struct CheckoutService {
    products: ProductClient,
    orders: OrderClient,
    buyers: BuyerClient,
    shipping: Arc<dyn ShippingDirectory>,
    carts: Arc<dyn CartStore>,
    registry: Arc<PaymentRegistry>,
    notifications: OrderNotifications,
    checkout_timeout: Duration,
    settlement_timeout: Duration,
}

impl CheckoutService {
    pub fn new(
        products: ProductClient,
        orders: OrderClient,
        buyers: BuyerClient,
        shipping: Arc<dyn ShippingDirectory>,
        carts: Arc<dyn CartStore>,
        registry: Arc<PaymentRegistry>,
    ) -> Self {
        Self {
            products,
            orders,
            buyers,
            shipping,
            carts,
            registry,
            notifications: OrderNotifications::default(),
            checkout_timeout: Duration::from_secs(5),
            settlement_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_notifications(mut self, notifications: OrderNotifications) -> Self {
        self.notifications = notifications;
        self
    }

    pub fn with_timeouts(mut self, checkout: Duration, settlement: Duration) -> Self {
        self.checkout_timeout = checkout;
        self.settlement_timeout = settlement;
        self
    }

    /// Stable list of payment method keys.
    pub fn supported_payment_methods(&self) -> Vec<String> {
        self.registry.supported_methods()
    }

    pub async fn order(&self, id: OrderId) -> Result<Order, CheckoutError> {
        Ok(self.orders.order(id).await?)
    }

    /// A buyer's orders, newest first.
    pub async fn orders_for_buyer(&self, buyer: BuyerId) -> Result<Vec<Order>, CheckoutError> {
        Ok(self.orders.orders_for_buyer(buyer).await?)
    }

    /// Turns the buyer's cart into an order, optionally settling payment.
    ///
    /// Failures before the order is persisted leave nothing behind: no order,
    /// no provisional address, the cart untouched. `checkout_timeout` bounds
    /// only that phase; once the create is sent its reply is awaited. After
    /// that point a payment failure is reported in
    /// [`CheckoutOutcome::payment`] and the order stays `pending`.
    #[instrument(skip(self, request), fields(buyer_id = %request.buyer, method = %request.payment_method))]
    pub async fn checkout(&self, request: CheckoutRequest) -> Result<CheckoutOutcome, CheckoutError> {
        let mut progress = Progress::default();
        let prepared = tokio::time::timeout(
            self.checkout_timeout,
            self.prepare(&request, &mut progress),
        )
        .await
        .unwrap_or_else(|_| {
            Err(CheckoutError::Infrastructure(
                "checkout timed out before the order was persisted".into(),
            ))
        });

        let placed = match prepared {
            Ok(draft) => {
                progress.submitted = true;
                draft.build(&self.orders).await.map_err(CheckoutError::from)
            }
            Err(e) => Err(e),
        };
        let order = match placed {
            Ok(order) => order,
            Err(e) => {
                self.compensate(&progress).await;
                warn!(error = %e, "Checkout aborted");
                return Err(e);
            }
        };
        info!(order_id = %order.id, total = %order.total(), "Order placed");

        if let Err(e) = self.carts.clear(request.buyer).await {
            warn!(error = %e, "Order placed but cart was not cleared");
        }

        let Some(payload) = request.settlement else {
            return Ok(CheckoutOutcome {
                order,
                payment: SettlementOutcome::Deferred,
            });
        };

        match self.settle(&order, payload).await {
            Ok(settlement) => Ok(CheckoutOutcome {
                order: settlement.order,
                payment: SettlementOutcome::Settled(settlement.payment),
            }),
            Err(e) => {
                warn!(order_id = %order.id, error = %e, "Settlement failed, order left pending");
                let order = self.orders.order(order.id).await.unwrap_or(order);
                Ok(CheckoutOutcome {
                    order,
                    payment: SettlementOutcome::Failed(e),
                })
            }
        }
    }

    /// Everything before persistence: cart, shipping, pre-flight and draft.
    async fn prepare(
        &self,
        request: &CheckoutRequest,
        progress: &mut Progress,
    ) -> Result<OrderBuilder, CheckoutError> {
        let lines = self.carts.lines(request.buyer).await?;
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart(request.buyer));
        }

        let address = self
            .shipping
            .resolve(request.buyer, request.shipping.clone())
            .await?;
        progress.address = Some(address);

        Ok(self
            .draft(request.buyer, &lines, &request.payment_method, &request.notes)
            .await?
            .set_shipping_target(address.id))
    }

    async fn compensate(&self, progress: &Progress) {
        let Some(address) = progress.address.filter(|a| a.provisional) else {
            return;
        };
        if progress.submitted {
            // The create may have reached the order actor; keep what it references.
            if self.orders_referencing(address.id).await {
                return;
            }
        }
        if let Err(e) = self.shipping.discard_provisional(address.id).await {
            warn!(address_id = %address.id, error = %e, "Provisional address not discarded");
        }
    }

    async fn orders_referencing(&self, address: AddressId) -> bool {
        match self.orders.list().await {
            Ok(orders) => orders.iter().any(|o| o.shipping_address == address),
            Err(_) => true,
        }
    }

    /// Pre-flight plus price capture: every product must be active and have
    /// enough stock for the requested quantity, checked before anything is
    /// written.
    async fn draft(
        &self,
        buyer: BuyerId,
        lines: &[CartLine],
        payment_method: &str,
        notes: &str,
    ) -> Result<OrderBuilder, CheckoutError> {
        let mut wanted: BTreeMap<ProductId, u32> = BTreeMap::new();
        for line in lines {
            *wanted.entry(line.product_id).or_default() += line.quantity;
        }

        let mut prices = BTreeMap::new();
        for (&product, &quantity) in &wanted {
            let entry = self
                .products
                .lookup(product)
                .await?
                .filter(|e| e.active)
                .ok_or(CheckoutError::ProductUnavailable(product))?;
            if !self.products.check_availability(product, quantity).await? {
                let available = self.products.inventory(product).await?.available();
                return Err(CheckoutError::InsufficientStock {
                    product,
                    requested: quantity,
                    available,
                });
            }
            prices.insert(product, entry.price);
        }

        let mut draft = OrderBuilder::new(buyer, self.registry.clone())
            .set_payment_method(payment_method)?
            .add_notes(notes);
        for line in lines {
            let price = prices
                .get(&line.product_id)
                .copied()
                .ok_or(CheckoutError::ProductUnavailable(line.product_id))?;
            draft = draft.add_item(line.product_id, line.quantity, price)?;
        }
        Ok(draft)
    }

    /// Builds and persists an order from an explicit cart snapshot.
    #[instrument(skip(self, lines, notes), fields(lines = lines.len()))]
    pub async fn create_order(
        &self,
        buyer: BuyerId,
        lines: &[CartLine],
        shipping_address: AddressId,
        payment_method: &str,
        notes: &str,
    ) -> Result<Order, CheckoutError> {
        if lines.is_empty() {
            return Err(CheckoutError::EmptyOrder);
        }
        let draft = tokio::time::timeout(self.checkout_timeout, async {
            let address = self
                .shipping
                .resolve(buyer, ShippingTarget::Existing(shipping_address))
                .await?;
            let draft = self.draft(buyer, lines, payment_method, notes).await?;
            Ok::<_, CheckoutError>(draft.set_shipping_target(address.id))
        })
        .await
        .map_err(|_| {
            CheckoutError::Infrastructure("order creation timed out before the order was persisted".into())
        })??;
        let order = draft.build(&self.orders).await?;
        info!(order_id = %order.id, total = %order.total(), "Order created");
        Ok(order)
    }

    /// Settles payment for a `pending` order.
    ///
    /// A declined payment is returned as `Ok` with a rejected
    /// [`PaymentResult`]; the order stays `pending` with the reason recorded.
    #[instrument(skip(self, payload))]
    pub async fn confirm_payment(
        &self,
        order_id: OrderId,
        payload: PaymentPayload,
    ) -> Result<Settlement, CheckoutError> {
        let order = self.orders.order(order_id).await?;
        if order.status() != OrderStatus::Pending {
            return Err(CheckoutError::InvalidTransition {
                from: order.status(),
                to: OrderStatus::Confirmed,
                allowed: order.status().allowed_transitions().to_vec(),
            });
        }
        self.settle(&order, payload).await
    }

    /// Validates the payload, claims the order and runs the settlement on its
    /// own task, so a caller that goes away cannot interrupt it between
    /// reserving stock and recording the payment.
    async fn settle(&self, order: &Order, payload: PaymentPayload) -> Result<Settlement, CheckoutError> {
        let strategy = self.registry.resolve(&order.payment_method)?;
        let missing = strategy.missing_fields(&payload);
        if !missing.is_empty() {
            return Err(CheckoutError::PaymentValidationFailed {
                method: strategy.method().to_string(),
                missing,
            });
        }

        let claimed = self.orders.begin_settlement(order.id).await?;
        let service = self.clone();
        let settled = tokio::spawn(
            async move { service.settle_claimed(claimed, strategy, payload).await }.in_current_span(),
        )
        .await
        .unwrap_or_else(|e| Err(CheckoutError::Infrastructure(format!("settlement task failed: {e}"))));

        if let Ok(settlement) = &settled {
            if settlement.payment.status == PaymentStatus::Approved {
                self.notify(Notice::Confirmed, settlement.order.clone());
            }
        }
        settled
    }

    /// Runs the strategy under `settlement_timeout`, then reserves and records.
    /// Every exit drops the claim taken by [`settle`](Self::settle).
    async fn settle_claimed(
        &self,
        order: Order,
        strategy: Box<dyn PaymentStrategy>,
        payload: PaymentPayload,
    ) -> Result<Settlement, CheckoutError> {
        let processed =
            tokio::time::timeout(self.settlement_timeout, strategy.process(order.total(), &payload)).await;
        let payment = match processed {
            Ok(Ok(payment)) => payment,
            Ok(Err(e)) => {
                self.abandon(order.id).await;
                return Err(e.into());
            }
            Err(_) => {
                self.abandon(order.id).await;
                return Err(CheckoutError::Infrastructure(format!(
                    "payment for {} timed out; order left pending",
                    order.id
                )));
            }
        };
        info!(order_id = %order.id, status = %payment.status, transaction_id = %payment.transaction_id, "Payment processed");

        if payment.status == PaymentStatus::Rejected {
            let reason = format!("payment {} was rejected", payment.transaction_id);
            let order = self.orders.record_rejection(order.id, reason).await?;
            return Ok(Settlement { order, payment });
        }

        let lines: Vec<(ProductId, u32)> = order
            .lines()
            .iter()
            .map(|l| (l.product_id, l.quantity))
            .collect();
        let reserve_now = !order.stock_reserved();
        if reserve_now {
            if let Err(e) = self.products.reserve_lines(&lines).await {
                let err = CheckoutError::from(e);
                if let Err(record) = self.orders.record_rejection(order.id, err.to_string()).await {
                    warn!(order_id = %order.id, error = %record, "Rejection reason not recorded");
                }
                return Err(err);
            }
        }

        let confirm = payment.status == PaymentStatus::Approved;
        let settled = self
            .orders
            .record_settlement(order.id, payment.transaction_id.clone(), confirm, reserve_now)
            .await;
        match settled {
            Ok(order) => Ok(Settlement { order, payment }),
            Err(e) => {
                if reserve_now && !self.products.release_lines(&lines).await {
                    error!(order_id = %order.id, "Stock left reserved after failed settlement");
                }
                self.abandon(order.id).await;
                Err(e.into())
            }
        }
    }

    async fn abandon(&self, order_id: OrderId) {
        if let Err(e) = self.orders.abandon_settlement(order_id).await {
            warn!(%order_id, error = %e, "Settlement claim not released");
        }
    }

    /// Moves an order through the status table.
    ///
    /// Cancelling an order with reserved stock hands the stock back; shipping
    /// one emails the buyer a tracking reference.
    #[instrument(skip(self))]
    pub async fn change_order_status(
        &self,
        order_id: OrderId,
        target: OrderStatus,
    ) -> Result<Order, CheckoutError> {
        let current = self.orders.order(order_id).await?;
        let mut order = self
            .orders
            .transition(order_id, Some(current.status()), target)
            .await?;
        info!(%order_id, from = %current.status(), to = %target, "Order status changed");

        match target {
            OrderStatus::Cancelled if order.stock_reserved() => {
                let lines: Vec<(ProductId, u32)> = order
                    .lines()
                    .iter()
                    .map(|l| (l.product_id, l.quantity))
                    .collect();
                if !self.products.release_lines(&lines).await {
                    return Err(CheckoutError::Infrastructure(format!(
                        "{order_id} cancelled but its stock was not fully released"
                    )));
                }
                order = self.orders.mark_stock_released(order_id).await?;
            }
            OrderStatus::Confirmed => self.notify(Notice::Confirmed, order.clone()),
            OrderStatus::Shipped => self.notify(Notice::Shipped, order.clone()),
            _ => {}
        }
        Ok(order)
    }

    /// Fire-and-forget; the notifiers log their own failures.
    fn notify(&self, notice: Notice, order: Order) {
        let buyers = self.buyers.clone();
        let notifications = self.notifications.clone();
        tokio::spawn(async move {
            let Some(buyer) = buyer_contact(&buyers, &order).await else {
                return;
            };
            match notice {
                Notice::Confirmed => notifications.order_confirmed(&buyer, &order).await,
                Notice::Shipped => notifications.order_shipped(&buyer, &order).await,
            }
        });
    }
}

async fn buyer_contact(buyers: &BuyerClient, order: &Order) -> Option<Buyer> {
    match buyers.get(order.buyer_id).await {
        Ok(Some(buyer)) => Some(buyer),
        Ok(None) => {
            warn!(buyer_id = %order.buyer_id, "Buyer vanished, notification skipped");
            None
        }
        Err(e) => {
            warn!(buyer_id = %order.buyer_id, error = %e, "Buyer lookup failed, notification skipped");
            None
        }
    }
}

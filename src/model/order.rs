//! The Order Aggregate: an order, its immutable lines, and the status rules.
//!
//! The mutating methods here are `pub(crate)` and called only from the order
//! actor's `handle_action`, so every change to `status` is serialized by the
//! actor and checked against [`OrderStatus::allowed_transitions`].

use crate::model::{AddressId, BuyerId, OrderStatus, ProductId};
use crate::order_actor::OrderError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// One product line, priced when the order was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl OrderLine {
    /// Always derived; never stored.
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Exact sum of the line subtotals.
pub fn order_total(lines: &[OrderLine]) -> Decimal {
    lines.iter().map(OrderLine::subtotal).sum()
}

/// Payload for persisting a built order together with its lines.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub buyer_id: BuyerId,
    pub shipping_address: AddressId,
    pub payment_method: String,
    pub notes: String,
    pub lines: Vec<OrderLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub buyer_id: BuyerId,
    pub shipping_address: AddressId,
    pub payment_method: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    total: Decimal,
    status: OrderStatus,
    transaction_id: String,
    rejection_reason: Option<String>,
    stock_reserved: bool,
    settling: bool,
    lines: Vec<OrderLine>,
}

impl Order {
    /// A fresh `pending` order. Rejects drafts that should never have been built.
    pub fn new(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        if params.lines.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        if let Some(line) = params
            .lines
            .iter()
            .find(|l| l.quantity == 0 || l.unit_price <= Decimal::ZERO)
        {
            return Err(OrderError::InvalidLineItem {
                product: line.product_id,
                quantity: line.quantity,
                unit_price: line.unit_price,
            });
        }
        if params.payment_method.trim().is_empty() {
            return Err(OrderError::MissingPaymentMethod);
        }

        let now = Utc::now();
        Ok(Self {
            id,
            buyer_id: params.buyer_id,
            shipping_address: params.shipping_address,
            payment_method: params.payment_method,
            notes: params.notes,
            created_at: now,
            updated_at: now,
            total: order_total(&params.lines),
            status: OrderStatus::Pending,
            transaction_id: String::new(),
            rejection_reason: None,
            stock_reserved: false,
            settling: false,
            lines: params.lines,
        })
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Empty until a payment attempt completes.
    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    pub fn rejection_reason(&self) -> Option<&str> {
        self.rejection_reason.as_deref()
    }

    pub fn stock_reserved(&self) -> bool {
        self.stock_reserved
    }

    /// A settlement attempt holds this order.
    pub fn settling(&self) -> bool {
        self.settling
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    fn check_transition(
        &self,
        expected: Option<OrderStatus>,
        target: OrderStatus,
    ) -> Result<(), OrderError> {
        if let Some(expected) = expected {
            if expected != self.status {
                return Err(OrderError::StatusConflict {
                    expected,
                    actual: self.status,
                });
            }
        }
        if !self.status.can_transition_to(target) {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to: target,
                allowed: self.status.allowed_transitions().to_vec(),
            });
        }
        Ok(())
    }

    /// Compare-and-set status change.
    pub(crate) fn transition(
        &mut self,
        expected: Option<OrderStatus>,
        target: OrderStatus,
    ) -> Result<(), OrderError> {
        self.check_transition(expected, target)?;
        self.status = target;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Claims a `pending` order for one settlement attempt at a time.
    pub(crate) fn begin_settlement(&mut self) -> Result<(), OrderError> {
        self.check_transition(Some(OrderStatus::Pending), OrderStatus::Confirmed)?;
        if self.settling {
            return Err(OrderError::SettlementInProgress(self.id));
        }
        self.settling = true;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Drops the claim without recording anything.
    pub(crate) fn abandon_settlement(&mut self) {
        self.settling = false;
        self.updated_at = Utc::now();
    }

    /// Records a completed (approved or pending) payment and drops the claim.
    ///
    /// Only a `pending` order can be settled. `reserved_now` says whether the
    /// caller just reserved this order's stock; doing that twice is refused.
    pub(crate) fn record_settlement(
        &mut self,
        transaction_id: String,
        confirm: bool,
        reserved_now: bool,
    ) -> Result<(), OrderError> {
        self.check_transition(Some(OrderStatus::Pending), OrderStatus::Confirmed)?;
        if reserved_now && self.stock_reserved {
            return Err(OrderError::StockAlreadyReserved(self.id));
        }

        self.transaction_id = transaction_id;
        self.stock_reserved |= reserved_now;
        self.rejection_reason = None;
        self.settling = false;
        if confirm {
            self.status = OrderStatus::Confirmed;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    pub(crate) fn record_rejection(&mut self, reason: String) {
        self.rejection_reason = Some(reason);
        self.settling = false;
        self.updated_at = Utc::now();
    }

    pub(crate) fn mark_stock_released(&mut self) {
        self.stock_reserved = false;
        self.updated_at = Utc::now();
    }
}

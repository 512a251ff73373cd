use crate::model::{BuyerId, OrderId, OrderStatus, ProductId};
use rust_decimal::Decimal;
use thiserror::Error;

pub(crate) fn status_list(statuses: &[OrderStatus]) -> String {
    if statuses.is_empty() {
        return "none".to_string();
    }
    statuses
        .iter()
        .map(|status| status.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order has no line items")]
    EmptyOrder,

    #[error("Invalid line item for {product}: quantity {quantity}, unit price {unit_price}")]
    InvalidLineItem {
        product: ProductId,
        quantity: u32,
        unit_price: Decimal,
    },

    #[error("Shipping target not set")]
    MissingShippingTarget,

    #[error("Payment method not set")]
    MissingPaymentMethod,

    #[error("Invalid payment method '{method}'; supported: {}", .supported.join(", "))]
    InvalidPaymentMethod {
        method: String,
        supported: Vec<String>,
    },

    #[error("Cannot move order from {from} to {to}; allowed: {}", status_list(.allowed))]
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
        allowed: Vec<OrderStatus>,
    },

    #[error("Order status changed concurrently: expected {expected}, found {actual}")]
    StatusConflict {
        expected: OrderStatus,
        actual: OrderStatus,
    },

    #[error("Payment for {0} is already being settled")]
    SettlementInProgress(OrderId),

    #[error("Stock for {0} is already reserved")]
    StockAlreadyReserved(OrderId),

    #[error("Unknown buyer: {0}")]
    UnknownBuyer(BuyerId),

    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_transition_names_all_parties() {
        let err = OrderError::InvalidTransition {
            from: OrderStatus::Confirmed,
            to: OrderStatus::Delivered,
            allowed: vec![OrderStatus::Shipped, OrderStatus::Cancelled],
        };
        assert_eq!(
            err.to_string(),
            "Cannot move order from confirmed to delivered; allowed: shipped, cancelled"
        );

        let terminal = OrderError::InvalidTransition {
            from: OrderStatus::Delivered,
            to: OrderStatus::Pending,
            allowed: vec![],
        };
        assert!(terminal.to_string().ends_with("allowed: none"));
    }
}

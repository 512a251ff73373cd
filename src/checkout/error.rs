use crate::address_actor::ShippingError;
use crate::buyer_actor::BuyerError;
use crate::collaborators::CartError;
use crate::inventory::InventoryError;
use crate::model::{BuyerId, OrderId, OrderStatus, ProductId};
use crate::order_actor::{status_list, OrderError};
use crate::payment::PaymentError;
use crate::product_actor::ProductError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Business rejections versus failures of the system itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The request broke a rule; the caller can fix it and retry.
    Rejected,
    /// Something underneath failed (closed actor, timeout, ledger corruption).
    Fatal,
}

/// Everything a checkout caller can see go wrong.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error("Cart of {0} is empty")]
    EmptyCart(BuyerId),

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

    #[error("Unsupported payment method '{method}'; supported: {}", .supported.join(", "))]
    UnsupportedPaymentMethod {
        method: String,
        supported: Vec<String>,
    },

    #[error("Insufficient stock for {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: ProductId,
        requested: u32,
        available: u32,
    },

    #[error("Product unavailable: {0}")]
    ProductUnavailable(ProductId),

    #[error("Cannot move order from {from} to {to}; allowed: {}", status_list(.allowed))]
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
        allowed: Vec<OrderStatus>,
    },

    #[error("Payment data for {method} is missing: {}", .missing.join(", "))]
    PaymentValidationFailed { method: String, missing: Vec<String> },

    #[error("Invalid shipping target: {0}")]
    InvalidShippingTarget(String),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Unknown buyer: {0}")]
    UnknownBuyer(BuyerId),

    #[error("Order status changed concurrently: expected {expected}, found {actual}")]
    StatusConflict {
        expected: OrderStatus,
        actual: OrderStatus,
    },

    #[error("Payment for {0} is already being settled")]
    SettlementInProgress(OrderId),

    #[error("Infrastructure failure: {0}")]
    Infrastructure(String),
}

impl CheckoutError {
    pub fn class(&self) -> ErrorClass {
        match self {
            CheckoutError::Infrastructure(_) => ErrorClass::Fatal,
            _ => ErrorClass::Rejected,
        }
    }

    /// HTTP-equivalent status.
    pub fn status_code(&self) -> u16 {
        match self {
            CheckoutError::OrderNotFound(_) | CheckoutError::UnknownBuyer(_) => 404,
            CheckoutError::StatusConflict { .. } | CheckoutError::SettlementInProgress(_) => 409,
            CheckoutError::Infrastructure(_) => 500,
            _ => 400,
        }
    }
}

impl From<InventoryError> for CheckoutError {
    fn from(e: InventoryError) -> Self {
        match e {
            InventoryError::InsufficientStock {
                product,
                requested,
                available,
            } => CheckoutError::InsufficientStock {
                product,
                requested,
                available,
            },
            other => CheckoutError::Infrastructure(other.to_string()),
        }
    }
}

impl From<ProductError> for CheckoutError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::Inventory(inner) => inner.into(),
            other => CheckoutError::Infrastructure(other.to_string()),
        }
    }
}

impl From<OrderError> for CheckoutError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::EmptyOrder => CheckoutError::EmptyOrder,
            OrderError::InvalidLineItem {
                product,
                quantity,
                unit_price,
            } => CheckoutError::InvalidLineItem {
                product,
                quantity,
                unit_price,
            },
            OrderError::MissingShippingTarget => CheckoutError::MissingShippingTarget,
            OrderError::MissingPaymentMethod => CheckoutError::MissingPaymentMethod,
            OrderError::InvalidPaymentMethod { method, supported } => {
                CheckoutError::InvalidPaymentMethod { method, supported }
            }
            OrderError::InvalidTransition { from, to, allowed } => {
                CheckoutError::InvalidTransition { from, to, allowed }
            }
            OrderError::StatusConflict { expected, actual } => {
                CheckoutError::StatusConflict { expected, actual }
            }
            OrderError::SettlementInProgress(id) => CheckoutError::SettlementInProgress(id),
            OrderError::UnknownBuyer(buyer) => CheckoutError::UnknownBuyer(buyer),
            OrderError::NotFound(id) => CheckoutError::OrderNotFound(id),
            other @ (OrderError::StockAlreadyReserved(_)
            | OrderError::ActorCommunicationError(_)) => {
                CheckoutError::Infrastructure(other.to_string())
            }
        }
    }
}

impl From<PaymentError> for CheckoutError {
    fn from(e: PaymentError) -> Self {
        match e {
            PaymentError::UnsupportedPaymentMethod { method, supported } => {
                CheckoutError::UnsupportedPaymentMethod { method, supported }
            }
            PaymentError::ValidationFailed { method, missing } => {
                CheckoutError::PaymentValidationFailed { method, missing }
            }
            other @ PaymentError::GatewayUnavailable { .. } => {
                CheckoutError::Infrastructure(other.to_string())
            }
        }
    }
}

impl From<ShippingError> for CheckoutError {
    fn from(e: ShippingError) -> Self {
        match e {
            ShippingError::ActorCommunicationError(msg) => CheckoutError::Infrastructure(msg),
            other => CheckoutError::InvalidShippingTarget(other.to_string()),
        }
    }
}

impl From<CartError> for CheckoutError {
    fn from(e: CartError) -> Self {
        CheckoutError::Infrastructure(e.to_string())
    }
}

impl From<BuyerError> for CheckoutError {
    fn from(e: BuyerError) -> Self {
        CheckoutError::Infrastructure(e.to_string())
    }
}

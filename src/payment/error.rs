use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PaymentError {
    #[error("Unsupported payment method '{method}'; supported: {}", .supported.join(", "))]
    UnsupportedPaymentMethod {
        method: String,
        supported: Vec<String>,
    },

    #[error("Payment data for {method} is missing: {}", .missing.join(", "))]
    ValidationFailed { method: String, missing: Vec<String> },

    /// The payment could not be attempted at all.
    #[error("Payment gateway for {method} is unavailable")]
    GatewayUnavailable { method: String },
}

//! Buyer notifications.
//!
//! Email and SMS are separate capabilities; [`OrderNotifications`] is handed one
//! of each instead of a single type implementing both. Everything here is
//! best-effort: failures are logged and never reach the caller.

use crate::model::{Buyer, Order};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum NotificationError {
    #[error("Delivery to {recipient} failed: {reason}")]
    DeliveryFailed { recipient: String, reason: String },
}

#[async_trait]
pub trait EmailNotifier: Send + Sync {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), NotificationError>;
}

#[async_trait]
pub trait SmsNotifier: Send + Sync {
    async fn send_sms(&self, phone: &str, message: &str) -> Result<(), NotificationError>;
}

/// Development email channel: writes the message to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleEmail;

#[async_trait]
impl EmailNotifier for ConsoleEmail {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), NotificationError> {
        info!(channel = "email", to, subject, body, "Notification sent");
        Ok(())
    }
}

/// Development SMS channel: writes the message to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSms;

#[async_trait]
impl SmsNotifier for ConsoleSms {
    async fn send_sms(&self, phone: &str, message: &str) -> Result<(), NotificationError> {
        info!(channel = "sms", phone, message, "Notification sent");
        Ok(())
    }
}

/// Tracking reference handed to the buyer when an order ships.
pub fn tracking_reference(order: &Order) -> String {
    format!("TRK-{}", order.id.0)
}

/// Order notifications composed from an email and an SMS channel.
#[derive(Clone)]
pub struct OrderNotifications {
    email: Arc<dyn EmailNotifier>,
    sms: Arc<dyn SmsNotifier>,
}

impl Default for OrderNotifications {
    fn default() -> Self {
        Self::new(Arc::new(ConsoleEmail), Arc::new(ConsoleSms))
    }
}

impl OrderNotifications {
    pub fn new(email: Arc<dyn EmailNotifier>, sms: Arc<dyn SmsNotifier>) -> Self {
        Self { email, sms }
    }

    pub async fn order_confirmed(&self, buyer: &Buyer, order: &Order) {
        let number = order.id.0;
        let sent = self
            .email
            .send_email(
                &buyer.email,
                &format!("Order #{number} confirmed - CellHub"),
                &format!("Your order #{number} was confirmed and is being processed."),
            )
            .await;
        if let Err(e) = sent {
            warn!(order_id = %order.id, error = %e, "Confirmation email not delivered");
        }

        if buyer.phone.trim().is_empty() {
            return;
        }
        let sent = self
            .sms
            .send_sms(
                &buyer.phone,
                &format!("CellHub: your order #{number} was confirmed. Thank you!"),
            )
            .await;
        if let Err(e) = sent {
            warn!(order_id = %order.id, error = %e, "Confirmation SMS not delivered");
        }
    }

    pub async fn order_shipped(&self, buyer: &Buyer, order: &Order) {
        let tracking = tracking_reference(order);
        let sent = self
            .email
            .send_email(
                &buyer.email,
                &format!("Order #{} is on its way - CellHub", order.id.0),
                &format!("Your order is on its way. Tracking: {tracking}"),
            )
            .await;
        if let Err(e) = sent {
            warn!(order_id = %order.id, error = %e, "Shipping email not delivered");
        }
    }
}

use crate::checkout::CheckoutService;
use crate::clients::{AddressClient, BuyerClient, OrderClient, ProductClient};
use crate::collaborators::{InMemoryCarts, OrderNotifications};
use crate::config::StoreConfig;
use crate::payment::PaymentRegistry;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum ShutdownError {
    #[error("Actor task failed: {0}")]
    ActorTaskFailed(String),
}

/// The running store.
///
/// `StoreSystem` is responsible for:
/// - **Lifecycle Management**: starting and stopping every actor
/// - **Dependency Wiring**: the order actor gets the buyer client as context;
///   checkout gets all clients, the cart store and the payment registry
///
/// ```ignore
/// let system = StoreSystem::new();
/// let buyer = system.buyers.create_buyer(params).await?;
/// let outcome = system.checkout.checkout(request).await?;
/// system.shutdown().await?;
/// ```
pub struct StoreSystem {
    pub products: ProductClient,
    pub orders: OrderClient,
    pub buyers: BuyerClient,
    pub addresses: AddressClient,
    pub carts: Arc<InMemoryCarts>,
    pub registry: Arc<PaymentRegistry>,
    pub checkout: CheckoutService,
    pub config: StoreConfig,
    /// Order actor first: it holds a buyer client, so the buyer actor can only
    /// stop after it.
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StoreSystem {
    /// Starts the store with [`StoreConfig::default`]. Must be called inside a
    /// Tokio runtime.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        info!(?config, "Starting store");
        let buffer = config.actor_buffer;

        let (buyer_actor, buyers) = crate::buyer_actor::new(buffer);
        let (address_actor, addresses) = crate::address_actor::new(buffer);
        let (product_actor, products) = crate::product_actor::new(buffer);
        let (order_actor, orders) = crate::order_actor::new(buffer);

        let order_handle = tokio::spawn(order_actor.run(buyers.clone()));
        let product_handle = tokio::spawn(product_actor.run(()));
        let address_handle = tokio::spawn(address_actor.run(()));
        let buyer_handle = tokio::spawn(buyer_actor.run(()));

        let carts = Arc::new(InMemoryCarts::new());
        let registry = Arc::new(PaymentRegistry::with_builtin(config.payment_mode));
        let checkout = CheckoutService::new(
            products.clone(),
            orders.clone(),
            buyers.clone(),
            Arc::new(addresses.clone()),
            carts.clone(),
            registry.clone(),
        )
        .with_timeouts(config.checkout_timeout, config.settlement_timeout);

        Self {
            products,
            orders,
            buyers,
            addresses,
            carts,
            registry,
            checkout,
            config,
            handles: vec![order_handle, product_handle, address_handle, buyer_handle],
        }
    }

    /// Replaces the notification channels checkout uses.
    pub fn with_notifications(mut self, notifications: OrderNotifications) -> Self {
        self.checkout = self.checkout.with_notifications(notifications);
        self
    }

    /// Drops every client, which closes the actors' mailboxes, then waits for
    /// each actor task to finish.
    ///
    /// # Errors
    /// `ActorTaskFailed` if an actor task panicked.
    pub async fn shutdown(mut self) -> Result<(), ShutdownError> {
        info!("Shutting down store...");
        let handles = std::mem::take(&mut self.handles);
        drop(self);

        for handle in handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Actor task failed");
                return Err(ShutdownError::ActorTaskFailed(e.to_string()));
            }
        }

        info!("Store shutdown complete.");
        Ok(())
    }
}

impl Default for StoreSystem {
    fn default() -> Self {
        Self::new()
    }
}

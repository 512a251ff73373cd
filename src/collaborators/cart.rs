use crate::model::{BuyerId, CartLine, ProductId};
use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    #[error("Cart store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait CartStore: Send + Sync {
    async fn lines(&self, buyer: BuyerId) -> Result<Vec<CartLine>, CartError>;

    /// Clearing an empty cart is a no-op.
    async fn clear(&self, buyer: BuyerId) -> Result<(), CartError>;
}

/// Carts kept in memory, one per buyer, lines in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryCarts {
    carts: Mutex<HashMap<BuyerId, Vec<CartLine>>>,
}

impl InMemoryCarts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds to the cart, merging with an existing line for the same product.
    pub async fn add_item(
        &self,
        buyer: BuyerId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }
        let mut carts = self.carts.lock().await;
        let lines = carts.entry(buyer).or_default();
        match lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => line.quantity += quantity,
            None => lines.push(CartLine {
                product_id,
                quantity,
            }),
        }
        Ok(())
    }

    pub async fn remove_item(&self, buyer: BuyerId, product_id: ProductId) {
        if let Some(lines) = self.carts.lock().await.get_mut(&buyer) {
            lines.retain(|l| l.product_id != product_id);
        }
    }
}

#[async_trait]
impl CartStore for InMemoryCarts {
    async fn lines(&self, buyer: BuyerId) -> Result<Vec<CartLine>, CartError> {
        Ok(self
            .carts
            .lock()
            .await
            .get(&buyer)
            .cloned()
            .unwrap_or_default())
    }

    async fn clear(&self, buyer: BuyerId) -> Result<(), CartError> {
        self.carts.lock().await.remove(&buyer);
        Ok(())
    }
}

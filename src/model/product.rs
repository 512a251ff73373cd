use crate::inventory::InventoryRecord;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

/// A phone in the catalog, together with its stock.
///
/// # Actor Framework
/// Managed by the product actor (see [`crate::product_actor`]). The embedded
/// [`InventoryRecord`] is created with the product and lives as long as it does;
/// it only changes through the ledger actions in
/// [`ProductAction`](crate::product_actor::ProductAction).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub brand: String,
    pub model_name: String,
    pub price: Decimal,
    pub active: bool,
    pub inventory: InventoryRecord,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Display name, e.g. "Samsung Galaxy A54".
    pub fn name(&self) -> String {
        format!("{} {}", self.brand, self.model_name)
    }
}

/// Payload for adding a phone to the catalog.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub brand: String,
    pub model_name: String,
    pub price: Decimal,
    pub initial_stock: u32,
}

/// Catalog maintenance. Stock is not updatable here; use the ledger actions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub price: Option<Decimal>,
    pub active: Option<bool>,
}

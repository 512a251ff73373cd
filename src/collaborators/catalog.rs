use crate::model::ProductId;
use crate::product_actor::ProductError;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// What checkout needs to know about a product to price a line.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub active: bool,
}

#[async_trait]
pub trait Catalog: Send + Sync {
    /// `None` when the product does not exist.
    async fn lookup(&self, id: ProductId) -> Result<Option<CatalogEntry>, ProductError>;
}

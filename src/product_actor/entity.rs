use super::{ProductAction, ProductActionResult, ProductError};
use crate::inventory::InventoryRecord;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use async_trait::async_trait;
use chrono::Utc;
use resource_actor::ActorEntity;
use rust_decimal::Decimal;

fn validate_price(price: Decimal) -> Result<Decimal, ProductError> {
    if price <= Decimal::ZERO {
        return Err(ProductError::InvalidPrice(price.to_string()));
    }
    Ok(price)
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Error = ProductError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, ProductError> {
        if params.brand.trim().is_empty() || params.model_name.trim().is_empty() {
            return Err(ProductError::InvalidName);
        }
        Ok(Self {
            id,
            brand: params.brand,
            model_name: params.model_name,
            price: validate_price(params.price)?,
            active: true,
            inventory: InventoryRecord::new(id, params.initial_stock),
            created_at: Utc::now(),
        })
    }

    /// Re-pricing and (de)activation. Stock only moves through actions.
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), ProductError> {
        let price = update.price.map(validate_price).transpose()?;
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(active) = update.active {
            self.active = active;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &(),
    ) -> Result<ProductActionResult, ProductError> {
        let ledger = &mut self.inventory;
        match action {
            ProductAction::CheckAvailability(quantity) => Ok(
                ProductActionResult::CheckAvailability(ledger.check_availability(quantity)),
            ),
            ProductAction::Reserve(quantity) => {
                ledger.reserve(quantity)?;
                Ok(ProductActionResult::Reserve(*ledger))
            }
            ProductAction::Release(quantity) => {
                ledger.release(quantity)?;
                Ok(ProductActionResult::Release(*ledger))
            }
            ProductAction::AddStock(quantity) => {
                ledger.add_stock(quantity)?;
                Ok(ProductActionResult::AddStock(*ledger))
            }
            ProductAction::Snapshot => Ok(ProductActionResult::Snapshot(*ledger)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::InventoryError;
    use rust_decimal_macros::dec;

    fn phone(stock: u32) -> Product {
        Product::from_create_params(
            ProductId(1),
            ProductCreate {
                brand: "Xiaomi".into(),
                model_name: "Redmi Note 13".into(),
                price: dec!(899900),
                initial_stock: stock,
            },
        )
        .unwrap()
    }

    #[test]
    fn new_products_are_active_and_stocked() {
        let product = phone(4);
        assert!(product.active);
        assert_eq!(product.inventory.available(), 4);
        assert_eq!(product.inventory.product_id(), ProductId(1));
        assert_eq!(product.name(), "Xiaomi Redmi Note 13");
    }

    #[test]
    fn non_positive_price_is_rejected() {
        let result = Product::from_create_params(
            ProductId(1),
            ProductCreate {
                brand: "Xiaomi".into(),
                model_name: "Redmi".into(),
                price: dec!(0),
                initial_stock: 1,
            },
        );
        assert_eq!(result.unwrap_err(), ProductError::InvalidPrice("0".into()));
    }

    #[tokio::test]
    async fn failed_reprice_changes_nothing() {
        let mut product = phone(1);
        let update = ProductUpdate {
            price: Some(dec!(-5)),
            active: Some(false),
        };
        assert!(product.on_update(update, &()).await.is_err());
        assert_eq!(product.price, dec!(899900));
        assert!(product.active);
    }

    #[tokio::test]
    async fn reserve_action_reports_shortage() {
        let mut product = phone(1);
        let err = product
            .handle_action(ProductAction::Reserve(2), &())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ProductError::Inventory(InventoryError::InsufficientStock {
                product: ProductId(1),
                requested: 2,
                available: 1
            })
        );
    }
}

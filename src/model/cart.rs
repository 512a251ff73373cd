use crate::model::ProductId;
use serde::{Deserialize, Serialize};

/// One line of a buyer's cart. Prices are not stored here; checkout captures the
/// catalog price at the moment the order is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Buyers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BuyerId(pub u32);

impl From<u32> for BuyerId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for BuyerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "buyer_{}", self.0)
    }
}

/// An authenticated customer. Only the contact details matter to checkout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Buyer {
    pub id: BuyerId,
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone)]
pub struct BuyerCreate {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuyerUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

use crate::model::BuyerId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for shipping addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AddressId(pub u32);

impl From<u32> for AddressId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for AddressId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "address_{}", self.0)
    }
}

/// A shipping target owned by a buyer.
///
/// `provisional` marks addresses created inline by a quick checkout rather than
/// saved by the buyer ahead of time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Address {
    pub id: AddressId,
    pub buyer_id: BuyerId,
    pub full_name: String,
    pub city: String,
    pub department: String,
    pub neighborhood: String,
    pub street: String,
    pub reference: String,
    pub phone: String,
    pub provisional: bool,
}

impl Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {}", self.street, self.neighborhood, self.city)
    }
}

/// Payload for storing an address.
#[derive(Debug, Clone)]
pub struct AddressCreate {
    pub buyer_id: BuyerId,
    pub full_name: String,
    pub city: String,
    pub department: String,
    pub neighborhood: String,
    pub street: String,
    pub reference: String,
    pub phone: String,
    pub provisional: bool,
}

/// Inline address fields sent with a quick checkout.
///
/// `full_name`, `city`, `street` and `phone` are required. `department` falls back
/// to the city, `neighborhood` to "Centro".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewAddress {
    pub full_name: String,
    pub city: String,
    pub street: String,
    pub phone: String,
    pub department: Option<String>,
    pub neighborhood: Option<String>,
    pub reference: Option<String>,
}

impl NewAddress {
    /// Names of the required fields that are blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("full_name", &self.full_name),
            ("city", &self.city),
            ("street", &self.street),
            ("phone", &self.phone),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Fills the defaults and tags the result as provisional.
    pub fn into_create(self, buyer_id: BuyerId) -> AddressCreate {
        let department = self
            .department
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| self.city.clone());
        AddressCreate {
            buyer_id,
            full_name: self.full_name,
            city: self.city,
            department,
            neighborhood: self
                .neighborhood
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| "Centro".to_string()),
            street: self.street,
            reference: self.reference.unwrap_or_default(),
            phone: self.phone,
            provisional: true,
        }
    }
}

/// Where an order ships to: a saved address, or inline fields that become a
/// provisional one.
#[derive(Debug, Clone)]
pub enum ShippingTarget {
    Existing(AddressId),
    Provisional(NewAddress),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provisional_address_gets_defaults() {
        let inline = NewAddress {
            full_name: "Juan Pérez".into(),
            city: "Bogotá".into(),
            street: "Cra 7 # 32-16".into(),
            phone: "3001234567".into(),
            ..Default::default()
        };
        assert!(inline.missing_fields().is_empty());

        let create = inline.into_create(BuyerId(4));
        assert_eq!(create.department, "Bogotá");
        assert_eq!(create.neighborhood, "Centro");
        assert_eq!(create.reference, "");
        assert!(create.provisional);
        assert_eq!(create.buyer_id, BuyerId(4));
    }

    #[test]
    fn blank_required_fields_are_reported() {
        let inline = NewAddress {
            full_name: "Ana".into(),
            city: "  ".into(),
            ..Default::default()
        };
        assert_eq!(inline.missing_fields(), vec!["city", "street", "phone"]);
    }
}

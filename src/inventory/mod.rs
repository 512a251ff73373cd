//! # Inventory Ledger
//!
//! Stock bookkeeping for a single product. [`InventoryRecord`] keeps its counters
//! private; the only way to change them is through the ledger operations below,
//! and those are only ever called from inside the product actor, which applies
//! one message at a time. That makes "check availability + reserve" one critical
//! section per record.

use crate::model::ProductId;
use serde::Serialize;
use thiserror::Error;

/// Errors raised by the ledger rules.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InventoryError {
    #[error("Insufficient stock for {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: ProductId,
        requested: u32,
        available: u32,
    },

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// Releasing more than is held means the books are already wrong.
    #[error("Release of {requested} exceeds reserved stock {reserved} for {product}")]
    ReleaseExceedsReserved {
        product: ProductId,
        requested: u32,
        reserved: u32,
    },
}

impl InventoryError {
    /// Ledger corruption rather than a business rule rejection.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, InventoryError::ReleaseExceedsReserved { .. })
    }
}

/// Available and reserved units for one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InventoryRecord {
    product_id: ProductId,
    available: u32,
    reserved: u32,
}

impl InventoryRecord {
    pub fn new(product_id: ProductId, available: u32) -> Self {
        Self {
            product_id,
            available,
            reserved: 0,
        }
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn available(&self) -> u32 {
        self.available
    }

    pub fn reserved(&self) -> u32 {
        self.reserved
    }

    pub fn check_availability(&self, quantity: u32) -> bool {
        quantity <= self.available
    }

    /// Moves `quantity` units from available to reserved.
    ///
    /// # Errors
    /// `InvalidQuantity` for zero, `InsufficientStock` when fewer units are
    /// available. The record is untouched on error.
    pub fn reserve(&mut self, quantity: u32) -> Result<(), InventoryError> {
        if quantity == 0 {
            return Err(InventoryError::InvalidQuantity(quantity));
        }
        if !self.check_availability(quantity) {
            return Err(InventoryError::InsufficientStock {
                product: self.product_id,
                requested: quantity,
                available: self.available,
            });
        }
        self.available -= quantity;
        self.reserved += quantity;
        Ok(())
    }

    /// Moves `quantity` units from reserved back to available.
    pub fn release(&mut self, quantity: u32) -> Result<(), InventoryError> {
        if quantity == 0 {
            return Err(InventoryError::InvalidQuantity(quantity));
        }
        if quantity > self.reserved {
            return Err(InventoryError::ReleaseExceedsReserved {
                product: self.product_id,
                requested: quantity,
                reserved: self.reserved,
            });
        }
        self.reserved -= quantity;
        self.available += quantity;
        Ok(())
    }

    /// Restocking.
    pub fn add_stock(&mut self, quantity: u32) -> Result<(), InventoryError> {
        if quantity == 0 {
            return Err(InventoryError::InvalidQuantity(quantity));
        }
        self.available = self
            .available
            .checked_add(quantity)
            .ok_or(InventoryError::InvalidQuantity(quantity))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(available: u32) -> InventoryRecord {
        InventoryRecord::new(ProductId(1), available)
    }

    #[test]
    fn over_request_is_rejected_without_mutation() {
        let mut rec = record(3);
        assert!(!rec.check_availability(5));

        let err = rec.reserve(5).unwrap_err();
        assert_eq!(
            err,
            InventoryError::InsufficientStock {
                product: ProductId(1),
                requested: 5,
                available: 3
            }
        );
        assert_eq!(rec.available(), 3);
        assert_eq!(rec.reserved(), 0);
    }

    #[test]
    fn reserve_then_release_restores_counters() {
        let mut rec = record(10);
        rec.add_stock(2).unwrap();
        rec.reserve(4).unwrap();
        let before = rec;

        rec.reserve(7).unwrap();
        assert_eq!((rec.available(), rec.reserved()), (1, 11));
        rec.release(7).unwrap();
        assert_eq!(rec, before);
    }

    #[test]
    fn reserving_everything_is_allowed() {
        let mut rec = record(2);
        rec.reserve(2).unwrap();
        assert_eq!((rec.available(), rec.reserved()), (0, 2));
        assert!(!rec.check_availability(1));
    }

    #[test]
    fn release_beyond_reserved_is_an_invariant_violation() {
        let mut rec = record(5);
        rec.reserve(1).unwrap();
        let err = rec.release(2).unwrap_err();
        assert!(err.is_invariant_violation());
        assert_eq!((rec.available(), rec.reserved()), (4, 1));
    }

    #[test]
    fn zero_quantities_are_invalid() {
        let mut rec = record(5);
        assert_eq!(rec.reserve(0), Err(InventoryError::InvalidQuantity(0)));
        assert_eq!(rec.release(0), Err(InventoryError::InvalidQuantity(0)));
        assert_eq!(rec.add_stock(0), Err(InventoryError::InvalidQuantity(0)));
    }
}

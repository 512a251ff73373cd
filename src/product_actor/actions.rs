use crate::inventory::InventoryRecord;

/// Ledger operations on a product's stock.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Whether the quantity could be reserved right now.
    CheckAvailability(u32),
    /// Moves units from available to reserved. Fails with `InsufficientStock`.
    Reserve(u32),
    /// Moves reserved units back to available.
    Release(u32),
    /// Restocks.
    AddStock(u32),
    /// Current counters.
    Snapshot,
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    CheckAvailability(bool),
    Reserve(InventoryRecord),
    Release(InventoryRecord),
    AddStock(InventoryRecord),
    Snapshot(InventoryRecord),
}

use crate::model::OrderStatus;

/// Every way an order changes after it is built.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Status change through the transition table. With `expected` set, the
    /// change only applies if the order is still in that status.
    Transition {
        expected: Option<OrderStatus>,
        target: OrderStatus,
    },
    /// Claim a `pending` order before invoking its payment strategy.
    BeginSettlement,
    /// Release the claim after an attempt that recorded nothing.
    AbandonSettlement,
    /// A payment attempt completed as approved (`confirm`) or pending.
    RecordSettlement {
        transaction_id: String,
        confirm: bool,
        reserved_now: bool,
    },
    /// Why the last settlement attempt did not go through.
    RecordRejection(String),
    /// Stock held for this order was handed back to the ledger.
    MarkStockReleased,
}

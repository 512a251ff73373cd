use crate::address_actor::ShippingError;
use crate::model::{AddressId, BuyerId, ShippingTarget};
use async_trait::async_trait;

/// The address an order will reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedAddress {
    pub id: AddressId,
    /// Created for this checkout; discard it if the checkout fails.
    pub provisional: bool,
}

#[async_trait]
pub trait ShippingDirectory: Send + Sync {
    /// Checks an existing address belongs to `buyer`, or stores inline fields as
    /// a provisional address.
    async fn resolve(
        &self,
        buyer: BuyerId,
        target: ShippingTarget,
    ) -> Result<ResolvedAddress, ShippingError>;

    async fn discard_provisional(&self, id: AddressId) -> Result<(), ShippingError>;
}

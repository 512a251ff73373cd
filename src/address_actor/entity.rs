use super::ShippingError;
use crate::model::{Address, AddressCreate, AddressId};
use async_trait::async_trait;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for Address {
    type Id = AddressId;
    type Create = AddressCreate;
    type Update = ();
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = ShippingError;

    fn from_create_params(id: AddressId, params: AddressCreate) -> Result<Self, ShippingError> {
        let missing: Vec<String> = [
            ("full_name", &params.full_name),
            ("city", &params.city),
            ("street", &params.street),
            ("phone", &params.phone),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name.to_string())
        .collect();
        if !missing.is_empty() {
            return Err(ShippingError::MissingFields(missing));
        }

        Ok(Self {
            id,
            buyer_id: params.buyer_id,
            full_name: params.full_name,
            city: params.city,
            department: params.department,
            neighborhood: params.neighborhood,
            street: params.street,
            reference: params.reference,
            phone: params.phone,
            provisional: params.provisional,
        })
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), ShippingError> {
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), ShippingError> {
        Ok(())
    }
}

use super::BuyerError;
use crate::model::{Buyer, BuyerCreate, BuyerId, BuyerUpdate};
use async_trait::async_trait;
use resource_actor::ActorEntity;

fn validate_email(email: &str) -> Result<(), BuyerError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(BuyerError::ValidationError(format!("invalid email '{email}'"))),
    }
}

#[async_trait]
impl ActorEntity for Buyer {
    type Id = BuyerId;
    type Create = BuyerCreate;
    type Update = BuyerUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = BuyerError;

    fn from_create_params(id: BuyerId, params: BuyerCreate) -> Result<Self, BuyerError> {
        if params.name.trim().is_empty() {
            return Err(BuyerError::ValidationError("name is required".into()));
        }
        validate_email(&params.email)?;
        Ok(Self {
            id,
            name: params.name,
            email: params.email,
            phone: params.phone,
        })
    }

    async fn on_update(&mut self, update: BuyerUpdate, _ctx: &()) -> Result<(), BuyerError> {
        if let Some(email) = &update.email {
            validate_email(email)?;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), BuyerError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_needs_a_domain() {
        assert!(validate_email("ana@cellhub.co").is_ok());
        assert!(validate_email("ana@localhost").is_err());
        assert!(validate_email("@cellhub.co").is_err());
    }
}

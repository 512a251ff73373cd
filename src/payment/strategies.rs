use super::{PaymentError, PaymentPayload, PaymentResult, PaymentStatus};
use async_trait::async_trait;
use rust_decimal::Decimal;

/// One way of paying.
#[async_trait]
pub trait PaymentStrategy: Send + Sync {
    /// Registry key, e.g. `"pse"`.
    fn method(&self) -> &str;

    /// Required payload fields that are absent.
    fn missing_fields(&self, payload: &PaymentPayload) -> Vec<String>;

    fn validate(&self, payload: &PaymentPayload) -> bool {
        self.missing_fields(payload).is_empty()
    }

    /// Attempts the payment. `Err` means the attempt could not be made; a
    /// declined payment is `Ok` with a rejected status.
    async fn process(
        &self,
        amount: Decimal,
        payload: &PaymentPayload,
    ) -> Result<PaymentResult, PaymentError>;
}

fn last4(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    chars[chars.len().saturating_sub(4)..].iter().collect()
}

fn ensure_valid(
    strategy: &dyn PaymentStrategy,
    payload: &PaymentPayload,
) -> Result<(), PaymentError> {
    let missing = strategy.missing_fields(payload);
    if missing.is_empty() {
        return Ok(());
    }
    Err(PaymentError::ValidationFailed {
        method: strategy.method().to_string(),
        missing,
    })
}

fn result(
    status: PaymentStatus,
    transaction_id: String,
    amount: Decimal,
    method: &str,
) -> PaymentResult {
    PaymentResult {
        status,
        transaction_id,
        amount,
        method: method.to_string(),
        redirect_url: None,
    }
}

/// Simulated card payment. Approves; transaction id `CC-<last 4 digits>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreditCard;

#[async_trait]
impl PaymentStrategy for CreditCard {
    fn method(&self) -> &str {
        "credit_card"
    }

    fn missing_fields(&self, payload: &PaymentPayload) -> Vec<String> {
        payload.missing(&["card_number", "cvv", "expiry", "cardholder_name"])
    }

    async fn process(&self, amount: Decimal, payload: &PaymentPayload) -> Result<PaymentResult, PaymentError> {
        ensure_valid(self, payload)?;
        let card = payload.get("card_number").unwrap_or_default();
        Ok(result(PaymentStatus::Approved, format!("CC-{}", last4(card)), amount, self.method()))
    }
}

/// Simulated debit card payment. Approves; transaction id `DB-<last 4 digits>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebitCard;

#[async_trait]
impl PaymentStrategy for DebitCard {
    fn method(&self) -> &str {
        "debit_card"
    }

    fn missing_fields(&self, payload: &PaymentPayload) -> Vec<String> {
        payload.missing(&["card_number", "cvv", "expiry"])
    }

    async fn process(&self, amount: Decimal, payload: &PaymentPayload) -> Result<PaymentResult, PaymentError> {
        ensure_valid(self, payload)?;
        let card = payload.get("card_number").unwrap_or_default();
        Ok(result(PaymentStatus::Approved, format!("DB-{}", last4(card)), amount, self.method()))
    }
}

/// Simulated PSE bank transfer. Pending until the bank confirms, with a
/// redirect to the bank's payment page.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pse;

#[async_trait]
impl PaymentStrategy for Pse {
    fn method(&self) -> &str {
        "pse"
    }

    fn missing_fields(&self, payload: &PaymentPayload) -> Vec<String> {
        payload.missing(&["bank_code", "document_type", "document_number"])
    }

    async fn process(&self, amount: Decimal, payload: &PaymentPayload) -> Result<PaymentResult, PaymentError> {
        ensure_valid(self, payload)?;
        let bank = payload.get("bank_code").unwrap_or_default();
        let mut pending = result(PaymentStatus::Pending, format!("PSE-{bank}-001"), amount, self.method());
        pending.redirect_url = Some(format!("https://pse.com/pay/{bank}"));
        Ok(pending)
    }
}

/// Simulated Nequi wallet push. Pending; transaction id `NQ-<last 4 of phone>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nequi;

#[async_trait]
impl PaymentStrategy for Nequi {
    fn method(&self) -> &str {
        "nequi"
    }

    fn missing_fields(&self, payload: &PaymentPayload) -> Vec<String> {
        payload.missing(&["phone_number"])
    }

    async fn process(&self, amount: Decimal, payload: &PaymentPayload) -> Result<PaymentResult, PaymentError> {
        ensure_valid(self, payload)?;
        let phone = payload.get("phone_number").unwrap_or_default();
        Ok(result(PaymentStatus::Pending, format!("NQ-{}", last4(phone)), amount, self.method()))
    }
}

/// Simulated Davivienda wallet. Accepts a phone or an account number.
#[derive(Debug, Clone, Copy, Default)]
pub struct Davivienda;

#[async_trait]
impl PaymentStrategy for Davivienda {
    fn method(&self) -> &str {
        "davivienda"
    }

    fn missing_fields(&self, payload: &PaymentPayload) -> Vec<String> {
        if payload.has("phone_number") || payload.has("account_number") {
            return Vec::new();
        }
        vec!["phone_number or account_number".to_string()]
    }

    async fn process(&self, amount: Decimal, payload: &PaymentPayload) -> Result<PaymentResult, PaymentError> {
        ensure_valid(self, payload)?;
        Ok(result(
            PaymentStatus::Pending,
            format!("DV-{}", amount.normalize()),
            amount,
            self.method(),
        ))
    }
}

/// Stand-in for a real gateway integration: validates like the method it
/// replaces, then reports the gateway as unavailable.
pub struct GatewayStub {
    simulated: Box<dyn PaymentStrategy>,
}

impl GatewayStub {
    pub fn new(simulated: Box<dyn PaymentStrategy>) -> Self {
        Self { simulated }
    }
}

#[async_trait]
impl PaymentStrategy for GatewayStub {
    fn method(&self) -> &str {
        self.simulated.method()
    }

    fn missing_fields(&self, payload: &PaymentPayload) -> Vec<String> {
        self.simulated.missing_fields(payload)
    }

    async fn process(&self, _amount: Decimal, payload: &PaymentPayload) -> Result<PaymentResult, PaymentError> {
        ensure_valid(self, payload)?;
        Err(PaymentError::GatewayUnavailable {
            method: self.method().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn card() -> PaymentPayload {
        PaymentPayload::new()
            .with("card_number", "4111111111114242")
            .with("cvv", "123")
            .with("expiry", "12/28")
            .with("cardholder_name", "ANA GOMEZ")
    }

    #[tokio::test]
    async fn credit_card_is_approved_with_last_four() {
        let paid = CreditCard.process(dec!(250), &card()).await.unwrap();
        assert_eq!(paid.status, PaymentStatus::Approved);
        assert_eq!(paid.transaction_id, "CC-4242");
        assert_eq!(paid.amount, dec!(250));
        assert_eq!(paid.method, "credit_card");
    }

    #[tokio::test]
    async fn debit_card_does_not_need_holder_name() {
        let payload = PaymentPayload::new()
            .with("card_number", "5555")
            .with("cvv", "1")
            .with("expiry", "01/30");
        assert!(!CreditCard.validate(&payload));
        let paid = DebitCard.process(dec!(10), &payload).await.unwrap();
        assert_eq!(paid.transaction_id, "DB-5555");
    }

    #[tokio::test]
    async fn pse_is_pending_with_bank_redirect() {
        let payload = PaymentPayload::new()
            .with("bank_code", "1007")
            .with("document_type", "CC")
            .with("document_number", "1020304050");
        let paid = Pse.process(dec!(250), &payload).await.unwrap();
        assert_eq!(paid.status, PaymentStatus::Pending);
        assert_eq!(paid.transaction_id, "PSE-1007-001");
        assert_eq!(paid.redirect_url.as_deref(), Some("https://pse.com/pay/1007"));
    }

    #[tokio::test]
    async fn wallets_are_pending() {
        let phone = PaymentPayload::new().with("phone_number", "3001234567");
        let nequi = Nequi.process(dec!(99.90), &phone).await.unwrap();
        assert_eq!((nequi.status, nequi.transaction_id.as_str()), (PaymentStatus::Pending, "NQ-4567"));

        let account = PaymentPayload::new().with("account_number", "0550-1234");
        let davi = Davivienda.process(dec!(250.00), &account).await.unwrap();
        assert_eq!((davi.status, davi.transaction_id.as_str()), (PaymentStatus::Pending, "DV-250"));
    }

    #[tokio::test]
    async fn invalid_payload_is_not_processed() {
        let err = Pse
            .process(dec!(1), &PaymentPayload::new().with("bank_code", "1007"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            PaymentError::ValidationFailed {
                method: "pse".into(),
                missing: vec!["document_type".into(), "document_number".into()],
            }
        );
        assert!(!Davivienda.validate(&PaymentPayload::new()));
    }

    #[tokio::test]
    async fn gateway_stub_validates_then_refuses() {
        let gateway = GatewayStub::new(Box::new(CreditCard));
        assert_eq!(gateway.method(), "credit_card");
        assert!(matches!(
            gateway.process(dec!(1), &PaymentPayload::new()).await,
            Err(PaymentError::ValidationFailed { .. })
        ));
        assert_eq!(
            gateway.process(dec!(1), &card()).await,
            Err(PaymentError::GatewayUnavailable {
                method: "credit_card".into()
            })
        );
    }
}

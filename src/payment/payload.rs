use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

/// Method-specific payment fields, e.g. `card_number` or `bank_code`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentPayload(BTreeMap<String, String>);

impl PaymentPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// The value for `key`, treating blank values as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Required keys that are absent or blank, in the given order.
    pub fn missing(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|key| !self.has(key))
            .map(|key| key.to_string())
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PaymentPayload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Approved,
    Pending,
    Rejected,
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PaymentStatus::Approved => "approved",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Rejected => "rejected",
        })
    }
}

/// Outcome of one payment attempt. A decline is a `Rejected` result, not an
/// error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentResult {
    pub status: PaymentStatus,
    pub transaction_id: String,
    pub amount: Decimal,
    pub method: String,
    pub redirect_url: Option<String>,
}

impl PaymentResult {
    /// Approved or pending: the attempt went through and stock should be held.
    pub fn is_accepted(&self) -> bool {
        self.status != PaymentStatus::Rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_count_as_missing() {
        let payload = PaymentPayload::new()
            .with("card_number", "4111111111111111")
            .with("cvv", "   ");
        assert_eq!(payload.get("card_number"), Some("4111111111111111"));
        assert_eq!(payload.missing(&["card_number", "cvv", "expiry"]), vec!["cvv", "expiry"]);
    }
}

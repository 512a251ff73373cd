//! Runtime configuration, loaded from environment variables with defaults.

use crate::payment::PaymentMode;
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

/// Store configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// `CELLHUB_PAYMENT_MODE`: `simulated` (default) or `live`.
    pub payment_mode: PaymentMode,
    /// `CELLHUB_ACTOR_BUFFER`: mailbox capacity of each actor (default 32).
    pub actor_buffer: usize,
    /// `CELLHUB_CHECKOUT_TIMEOUT_MS`: bound on everything before the order is
    /// persisted (default 5000).
    pub checkout_timeout: Duration,
    /// `CELLHUB_SETTLEMENT_TIMEOUT_MS`: bound on one payment settlement
    /// (default 10000).
    pub settlement_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            payment_mode: PaymentMode::Simulated,
            actor_buffer: 32,
            checkout_timeout: Duration::from_millis(5000),
            settlement_timeout: Duration::from_millis(10_000),
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    /// Values that fail to parse fall back to the default with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let millis = |key: &str, default: Duration| {
            parse_or(&lookup, key, default.as_millis() as u64)
                .filter(|&ms| ms > 0)
                .map_or(default, Duration::from_millis)
        };
        Self {
            payment_mode: parse_or(&lookup, "CELLHUB_PAYMENT_MODE", defaults.payment_mode)
                .unwrap_or(defaults.payment_mode),
            actor_buffer: parse_or(&lookup, "CELLHUB_ACTOR_BUFFER", defaults.actor_buffer)
                .filter(|&n| n > 0)
                .unwrap_or(defaults.actor_buffer),
            checkout_timeout: millis("CELLHUB_CHECKOUT_TIMEOUT_MS", defaults.checkout_timeout),
            settlement_timeout: millis("CELLHUB_SETTLEMENT_TIMEOUT_MS", defaults.settlement_timeout),
        }
    }
}

/// `None` only when the variable is set but unusable, so the caller can still
/// reject values that parse but make no sense.
fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Option<T>
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        return Some(default);
    };
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, value = %raw, error = %e, %default, "Invalid config value, using default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(StoreConfig::from_lookup(lookup(&[])), StoreConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = StoreConfig::from_lookup(lookup(&[
            ("CELLHUB_PAYMENT_MODE", "live"),
            ("CELLHUB_ACTOR_BUFFER", "128"),
            ("CELLHUB_CHECKOUT_TIMEOUT_MS", "250"),
            ("CELLHUB_SETTLEMENT_TIMEOUT_MS", "1500"),
        ]));
        assert_eq!(config.payment_mode, PaymentMode::Live);
        assert_eq!(config.actor_buffer, 128);
        assert_eq!(config.checkout_timeout, Duration::from_millis(250));
        assert_eq!(config.settlement_timeout, Duration::from_millis(1500));
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let config = StoreConfig::from_lookup(lookup(&[
            ("CELLHUB_PAYMENT_MODE", "paypal"),
            ("CELLHUB_ACTOR_BUFFER", "0"),
            ("CELLHUB_CHECKOUT_TIMEOUT_MS", "soon"),
        ]));
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn zero_timeouts_fall_back_to_defaults() {
        let config = StoreConfig::from_lookup(lookup(&[
            ("CELLHUB_CHECKOUT_TIMEOUT_MS", "0"),
            ("CELLHUB_SETTLEMENT_TIMEOUT_MS", "0"),
        ]));
        assert_eq!(config.checkout_timeout, StoreConfig::default().checkout_timeout);
        assert_eq!(config.settlement_timeout, StoreConfig::default().settlement_timeout);
    }
}

use super::{
    CreditCard, Davivienda, DebitCard, GatewayStub, Nequi, PaymentError, PaymentStrategy, Pse,
};
use std::fmt::Display;
use std::str::FromStr;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::info;

/// Whether the built-in strategies simulate payments or talk to a gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentMode {
    #[default]
    Simulated,
    Live,
}

impl FromStr for PaymentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simulated" | "simulation" | "sandbox" => Ok(PaymentMode::Simulated),
            "live" | "real" | "production" => Ok(PaymentMode::Live),
            other => Err(format!("unknown payment mode '{other}'")),
        }
    }
}

impl Display for PaymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PaymentMode::Simulated => "simulated",
            PaymentMode::Live => "live",
        })
    }
}

/// Builds a fresh strategy for each payment attempt.
pub type StrategyFactory = Arc<dyn Fn() -> Box<dyn PaymentStrategy> + Send + Sync>;

/// Method key to strategy factory, in registration order.
///
/// Read-mostly: lookups take a read lock, [`register`](Self::register) a write
/// lock. Re-registering a key replaces its factory and keeps its position.
pub struct PaymentRegistry {
    mode: PaymentMode,
    factories: RwLock<Vec<(String, StrategyFactory)>>,
}

impl PaymentRegistry {
    /// An empty registry.
    pub fn new(mode: PaymentMode) -> Self {
        Self {
            mode,
            factories: RwLock::new(Vec::new()),
        }
    }

    /// `credit_card`, `debit_card`, `pse`, `nequi` and `davivienda`, simulated or
    /// behind the gateway stub depending on `mode`.
    pub fn with_builtin(mode: PaymentMode) -> Self {
        let registry = Self::new(mode);
        registry.register_builtin("credit_card", || Box::new(CreditCard));
        registry.register_builtin("debit_card", || Box::new(DebitCard));
        registry.register_builtin("pse", || Box::new(Pse));
        registry.register_builtin("nequi", || Box::new(Nequi));
        registry.register_builtin("davivienda", || Box::new(Davivienda));
        registry
    }

    fn register_builtin(&self, method: &str, simulated: fn() -> Box<dyn PaymentStrategy>) {
        match self.mode {
            PaymentMode::Simulated => self.register(method, simulated),
            PaymentMode::Live => {
                self.register(method, move || Box::new(GatewayStub::new(simulated())))
            }
        }
    }

    pub fn mode(&self) -> PaymentMode {
        self.mode
    }

    /// Adds `method`, or replaces its factory if it is already registered.
    pub fn register<F>(&self, method: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn PaymentStrategy> + Send + Sync + 'static,
    {
        let method = method.into();
        let factory: StrategyFactory = Arc::new(factory);
        let mut factories = self.write();
        match factories.iter_mut().find(|(key, _)| *key == method) {
            Some(entry) => {
                info!(%method, "Payment method re-registered");
                entry.1 = factory;
            }
            None => {
                info!(%method, "Payment method registered");
                factories.push((method, factory));
            }
        }
    }

    /// A strategy for `method`.
    ///
    /// # Errors
    /// `UnsupportedPaymentMethod` listing every registered key.
    pub fn resolve(&self, method: &str) -> Result<Box<dyn PaymentStrategy>, PaymentError> {
        let factories = self.read();
        match factories.iter().find(|(key, _)| key == method) {
            Some((_, factory)) => Ok(factory()),
            None => Err(PaymentError::UnsupportedPaymentMethod {
                method: method.to_string(),
                supported: factories.iter().map(|(key, _)| key.clone()).collect(),
            }),
        }
    }

    pub fn supported_methods(&self) -> Vec<String> {
        self.read().iter().map(|(key, _)| key.clone()).collect()
    }

    pub fn supports(&self, method: &str) -> bool {
        self.read().iter().any(|(key, _)| key == method)
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<(String, StrategyFactory)>> {
        self.factories.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<(String, StrategyFactory)>> {
        self.factories.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for PaymentRegistry {
    fn default() -> Self {
        Self::with_builtin(PaymentMode::Simulated)
    }
}

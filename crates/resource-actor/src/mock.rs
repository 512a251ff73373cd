//! # Mock Actors
//!
//! [`MockClient<T>`] hands out a real [`ResourceClient<T>`] whose requests are
//! answered from a queue of scripted expectations instead of a running actor.
//! It is the tool for testing code *around* a client (the checkout orchestrator,
//! the order builder, the stock client's reservation rollback) without spinning
//! up the actor that would normally answer.
//!
//! | | `MockClient` | real actor |
//! |---|---|---|
//! | state | none, scripted replies | real store |
//! | failure injection | `return_err(...)` | needs crafted state |
//! | ordering | exactly the scripted order | arrival order |
//!
//! ```rust
//! use resource_actor::mock::MockClient;
//! use resource_actor::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Sku { id: u32 }
//! #[derive(Debug)] struct SkuCreate;
//! #[derive(Debug)] struct SkuUpdate;
//! #[derive(Debug)] enum SkuAction {}
//! #[derive(Debug, thiserror::Error)] #[error("sku")] struct SkuError;
//!
//! #[async_trait]
//! impl ActorEntity for Sku {
//!     type Id = u32; type Create = SkuCreate; type Update = SkuUpdate;
//!     type Action = SkuAction; type ActionResult = (); type Context = (); type Error = SkuError;
//!     fn from_create_params(id: u32, _: SkuCreate) -> Result<Self, SkuError> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: SkuUpdate, _: &()) -> Result<(), SkuError> { Ok(()) }
//!     async fn handle_action(&mut self, _: SkuAction, _: &()) -> Result<(), SkuError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Sku>::new();
//!     mock.expect_get(7).return_err(FrameworkError::ActorClosed);
//!
//!     let result = mock.client().get(7).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! Requests that arrive with no matching expectation (wrong kind, wrong id, or
//! queue exhausted) are answered with `ActorDropped` and recorded; [`MockClient::verify`]
//! panics listing them.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;

enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

impl<T: ActorEntity> Expectation<T> {
    fn describe(&self) -> String {
        match self {
            Expectation::Get { id, .. } => format!("Get({id})"),
            Expectation::List { .. } => "List".to_string(),
            Expectation::Create { .. } => "Create".to_string(),
            Expectation::Update { id, .. } => format!("Update({id})"),
            Expectation::Delete { id, .. } => format!("Delete({id})"),
            Expectation::Action { id, .. } => format!("Action({id})"),
        }
    }
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Scripted stand-in for a resource actor.
///
/// ```ignore
/// let mut products = MockClient::<Product>::new();
/// products.expect_action(ProductId(1)).return_ok(StockActionResult::Reserved(record));
/// let stock = StockClient::new(products.client());
/// // ... exercise code that uses `stock` ...
/// products.verify();
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    unexpected: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a mock with an empty expectation queue. Must be called inside a
    /// Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let unexpected = Arc::new(Mutex::new(Vec::new()));
        let queue = expectations.clone();
        let misses = unexpected.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&queue).pop_front();
                match (request, expectation) {
                    (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response }))
                        if id == want =>
                    {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update { id: want, response }),
                    ) if id == want => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Delete { id, respond_to },
                        Some(Expectation::Delete { id: want, response }),
                    ) if id == want => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action { id: want, response }),
                    ) if id == want => {
                        let _ = respond_to.send(response);
                    }
                    (request, expectation) => {
                        let expected = expectation
                            .map(|e| e.describe())
                            .unwrap_or_else(|| "nothing".to_string());
                        // Record before the responder is dropped so `verify` sees it.
                        lock(&misses).push(format!(
                            "got {}, expected {expected}",
                            describe_request(&request)
                        ));
                        drop(request);
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            unexpected,
            _handle: handle,
        }
    }

    /// A client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_list(&mut self) -> ListExpectationBuilder<T> {
        ListExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_create(&mut self) -> CreateExpectationBuilder<T> {
        CreateExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_update(&mut self, id: T::Id) -> UpdateExpectationBuilder<T> {
        UpdateExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_delete(&mut self, id: T::Id) -> DeleteExpectationBuilder<T> {
        DeleteExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_action(&mut self, id: T::Id) -> ActionExpectationBuilder<T> {
        ActionExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Panics if an expectation is left over or a request went unmatched.
    pub fn verify(&self) {
        let misses = lock(&self.unexpected);
        if !misses.is_empty() {
            panic!("Unexpected requests: {}", misses.join("; "));
        }
        let remaining = lock(&self.expectations);
        if !remaining.is_empty() {
            let pending: Vec<String> = remaining.iter().map(|e| e.describe()).collect();
            panic!(
                "Not all expectations were met. {} remaining: {}",
                pending.len(),
                pending.join(", ")
            );
        }
    }
}

fn describe_request<T: ActorEntity>(request: &ResourceRequest<T>) -> String {
    match request {
        ResourceRequest::Get { id, .. } => format!("Get({id})"),
        ResourceRequest::List { .. } => "List".to_string(),
        ResourceRequest::Create { params, .. } => format!("Create({params:?})"),
        ResourceRequest::Update { id, .. } => format!("Update({id})"),
        ResourceRequest::Delete { id, .. } => format!("Delete({id})"),
        ResourceRequest::Action { id, action, .. } => format!("Action({id}, {action:?})"),
    }
}

macro_rules! expectation_builder {
    ($name:ident, $variant:ident, $ok:ty, id) => {
        pub struct $name<T: ActorEntity> {
            id: T::Id,
            expectations: Queue<T>,
        }

        impl<T: ActorEntity> $name<T> {
            pub fn return_ok(self, value: $ok) {
                lock(&self.expectations).push_back(Expectation::$variant {
                    id: self.id,
                    response: Ok(value),
                });
            }

            pub fn return_err(self, error: FrameworkError) {
                lock(&self.expectations).push_back(Expectation::$variant {
                    id: self.id,
                    response: Err(error),
                });
            }
        }
    };
    ($name:ident, $variant:ident, $ok:ty) => {
        pub struct $name<T: ActorEntity> {
            expectations: Queue<T>,
        }

        impl<T: ActorEntity> $name<T> {
            pub fn return_ok(self, value: $ok) {
                lock(&self.expectations).push_back(Expectation::$variant { response: Ok(value) });
            }

            pub fn return_err(self, error: FrameworkError) {
                lock(&self.expectations).push_back(Expectation::$variant { response: Err(error) });
            }
        }
    };
}

expectation_builder!(GetExpectationBuilder, Get, Option<T>, id);
expectation_builder!(ListExpectationBuilder, List, Vec<T>);
expectation_builder!(CreateExpectationBuilder, Create, T::Id);
expectation_builder!(UpdateExpectationBuilder, Update, T, id);
expectation_builder!(DeleteExpectationBuilder, Delete, (), id);
expectation_builder!(ActionExpectationBuilder, Action, T::ActionResult, id);

/// A client plus the raw receiver, for tests that want to inspect each request
/// and answer it by hand.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next request, if it is an `Action`.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    tokio::sync::oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a `Create`.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Create,
    tokio::sync::oneshot::Sender<Result<T::Id, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

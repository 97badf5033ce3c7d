//! # Mocking Utilities
//!
//! Test doubles for code that talks to a collection through a [`CollectionClient`],
//! so typed clients and services can be tested without a running actor.
//!
//! | | `MockClient` | Real actor |
//! |---|---|---|
//! | State | scripted responses | real collection |
//! | Error injection | `return_err` | needs a specific state |
//! | Use case | logic *around* the client | the entity hooks themselves |
//!
//! Two styles are available:
//!
//! - [`MockClient`]: queue expected requests with canned responses, then call
//!   [`MockClient::verify`].
//! - [`create_mock_client`] plus the `expect_*` helpers: receive the raw request
//!   and answer it by hand, useful when the test must inspect the payload.
//!
//! ```rust
//! use collection_actor::mock::MockClient;
//! use collection_actor::{CollectionEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Bin { id: String, qty: u32 }
//! #[derive(Debug)] struct BinCreate;
//! #[derive(Debug)] struct BinUpdate;
//! #[derive(Debug)] enum BinAction {}
//! #[derive(Debug, thiserror::Error)] #[error("bin")] struct BinError;
//!
//! #[async_trait]
//! impl CollectionEntity for Bin {
//!     type Id = String; type Create = BinCreate; type Update = BinUpdate;
//!     type Action = BinAction; type ActionResult = (); type Context = (); type Error = BinError;
//!     fn id(&self) -> &String { &self.id }
//!     fn from_create(id: String, _: BinCreate, _: &()) -> Result<Self, BinError> { Ok(Self { id, qty: 0 }) }
//!     async fn on_update(&mut self, _: BinUpdate, _: &()) -> Result<(), BinError> { Ok(()) }
//!     async fn handle_action(&mut self, _: BinAction, _: &()) -> Result<(), BinError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Bin>::new();
//!     mock.expect_list().return_ok(vec![Bin { id: "B-1".into(), qty: 4 }]);
//!     mock.expect_get("B-2".into()).return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.list().await.unwrap().len(), 1);
//!     assert!(matches!(client.get("B-2".into()).await, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```

use crate::client::CollectionClient;
use crate::entity::CollectionEntity;
use crate::error::FrameworkError;
use crate::message::CollectionRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

enum Expectation<T: CollectionEntity> {
    Create(Result<T::Id, FrameworkError>),
    Get(T::Id, Result<Option<T>, FrameworkError>),
    List(Result<Vec<T>, FrameworkError>),
    Update(T::Id, Result<T, FrameworkError>),
    Delete(T::Id, Result<(), FrameworkError>),
    Action(T::Id, Result<T::ActionResult, FrameworkError>),
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A client backed by a queue of scripted responses.
///
/// Requests must arrive in the order their expectations were queued. A request
/// that does not match the next expectation (kind or id) panics the responder
/// task, which surfaces in the test as `FrameworkError::ActorDropped`.
pub struct MockClient<T: CollectionEntity> {
    client: CollectionClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: CollectionEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: CollectionEntity> MockClient<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<CollectionRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().expect("expectation queue poisoned").pop_front();
                match (request, next) {
                    (
                        CollectionRequest::Create { respond_to, .. },
                        Some(Expectation::Create(response)),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        CollectionRequest::Get { id, respond_to },
                        Some(Expectation::Get(expected, response)),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (CollectionRequest::List { respond_to }, Some(Expectation::List(response))) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        CollectionRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update(expected, response)),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        CollectionRequest::Delete { id, respond_to },
                        Some(Expectation::Delete(expected, response)),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        CollectionRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action(expected, response)),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (request, _) => panic!("Unexpected request: {}", request.kind()),
                }
            }
        });

        Self {
            client: CollectionClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// The client to hand to the code under test.
    pub fn client(&self) -> CollectionClient<T> {
        self.client.clone()
    }

    pub fn expect_create(&mut self) -> Expect<T, T::Id> {
        Expect::new(self.expectations.clone(), Box::new(Expectation::Create))
    }

    pub fn expect_get(&mut self, id: T::Id) -> Expect<T, Option<T>> {
        Expect::new(
            self.expectations.clone(),
            Box::new(move |response| Expectation::Get(id, response)),
        )
    }

    pub fn expect_list(&mut self) -> Expect<T, Vec<T>> {
        Expect::new(self.expectations.clone(), Box::new(Expectation::List))
    }

    pub fn expect_update(&mut self, id: T::Id) -> Expect<T, T> {
        Expect::new(
            self.expectations.clone(),
            Box::new(move |response| Expectation::Update(id, response)),
        )
    }

    pub fn expect_delete(&mut self, id: T::Id) -> Expect<T, ()> {
        Expect::new(
            self.expectations.clone(),
            Box::new(move |response| Expectation::Delete(id, response)),
        )
    }

    pub fn expect_action(&mut self, id: T::Id) -> Expect<T, T::ActionResult> {
        Expect::new(
            self.expectations.clone(),
            Box::new(move |response| Expectation::Action(id, response)),
        )
    }

    /// Panics if some queued expectation was never consumed.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .expect("expectation queue poisoned")
            .len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

type Wrap<T, R> = Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T>>;

/// Builder returned by the `expect_*` methods; finish it with a response.
pub struct Expect<T: CollectionEntity, R> {
    queue: Queue<T>,
    wrap: Wrap<T, R>,
}

impl<T: CollectionEntity, R> Expect<T, R> {
    fn new(queue: Queue<T>, wrap: Wrap<T, R>) -> Self {
        Self { queue, wrap }
    }

    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.wrap)(response);
        self.queue
            .lock()
            .expect("expectation queue poisoned")
            .push_back(expectation);
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// A client whose requests land on the returned receiver instead of an actor.
pub fn create_mock_client<T: CollectionEntity>(
    buffer_size: usize,
) -> (CollectionClient<T>, mpsc::Receiver<CollectionRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CollectionClient::new(sender), receiver)
}

/// Next request, if it is a `Create`.
pub async fn expect_create<T: CollectionEntity>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next request, if it is an `Update`.
pub async fn expect_update<T: CollectionEntity>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(T::Id, T::Update, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Next request, if it is an `Action`.
pub async fn expect_action<T: CollectionEntity>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(CollectionRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

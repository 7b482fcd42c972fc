//! # Mock Remote & Testing Guide
//!
//! The `MockRemote<T, E>` type implements [`RemoteCollection<T>`] entirely in memory. You
//! queue the responses the "server" should give, in order, and the mock hands them out to
//! whoever calls it. It lets you test stores, sync coordinators and screens deterministically
//! without any network.
//!
//! ## When to use the mock vs a real server
//!
//! | Feature | MockRemote | In-process HTTP server |
//! |---------|------------|------------------------|
//! | **Speed** | Instant | Fast (binds a socket) |
//! | **Determinism** | 100% | Subject to scheduler |
//! | **Error Injection** | Easy (`return_err`) | Needs a dedicated route |
//! | **Completion order** | Controllable (`held`) | Hard |
//! | **Use Case** | Sync and screen logic | The HTTP client itself |
//!
//! ## Example
//!
//! ```rust
//! use store_framework::mock::{MockCall, MockRemote};
//! use store_framework::{CollectionStore, CollectionSync, StoreEntity};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Tag { id: u32, label: String }
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct TagDraft { label: String }
//!
//! impl StoreEntity for Tag {
//!     type Id = u32;
//!     type Draft = TagDraft;
//!     fn id(&self) -> &u32 { &self.id }
//!     fn to_draft(&self) -> TagDraft { TagDraft { label: self.label.clone() } }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (store, handle) = CollectionStore::<Tag>::new(8);
//!     tokio::spawn(store.run());
//!
//!     // 1. Queue the server's answers
//!     let remote = MockRemote::<Tag>::new();
//!     remote.expect_create().return_ok(Tag { id: 7, label: "red".into() });
//!
//!     // 2. Drive the code under test
//!     let mut tags = CollectionSync::new(handle.clone(), remote.clone());
//!     tags.begin_create().label = "red".into();
//!     tags.submit().await.unwrap();
//!
//!     // 3. Assert on calls and state
//!     assert_eq!(remote.calls(), vec![MockCall::Create(TagDraft { label: "red".into() })]);
//!     assert_eq!(handle.snapshot().len(), 1);
//!     remote.verify();
//! }
//! ```
//!
//! ## Controlling completion order
//!
//! `held(release)` keeps a response back until the paired `oneshot::Sender` fires. That is
//! how tests make a slow update finish *after* a later delete.

use crate::entity::StoreEntity;
use crate::remote::RemoteCollection;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

/// Default error type for mocks that don't care about the concrete failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Mock failure: {0}")]
pub struct MockFailure(pub String);

/// A call observed by the mock, with the arguments it carried.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall<T: StoreEntity> {
    List,
    Create(T::Draft),
    Update(T::Id, T::Draft),
    Delete(T::Id),
}

enum Expectation<T: StoreEntity, E> {
    List { response: Result<Vec<T>, E> },
    Create { response: Result<T, E> },
    Update { id: T::Id, response: Result<T, E> },
    Delete { id: T::Id, response: Result<(), E> },
}

impl<T: StoreEntity, E> Expectation<T, E> {
    fn name(&self) -> &'static str {
        match self {
            Expectation::List { .. } => "list",
            Expectation::Create { .. } => "create",
            Expectation::Update { .. } => "update",
            Expectation::Delete { .. } => "delete",
        }
    }
}

struct Queued<T: StoreEntity, E> {
    expectation: Expectation<T, E>,
    release: Option<oneshot::Receiver<()>>,
}

type Queue<T, E> = Arc<Mutex<VecDeque<Queued<T, E>>>>;

/// An in-memory [`RemoteCollection`] driven by queued expectations.
///
/// Clones share the same queue and call log, so one mock can back several screens.
pub struct MockRemote<T: StoreEntity, E = MockFailure> {
    expectations: Queue<T, E>,
    calls: Arc<Mutex<Vec<MockCall<T>>>>,
}

impl<T: StoreEntity, E> Clone for MockRemote<T, E> {
    fn clone(&self) -> Self {
        Self {
            expectations: self.expectations.clone(),
            calls: self.calls.clone(),
        }
    }
}

impl<T: StoreEntity, E> Default for MockRemote<T, E> {
    fn default() -> Self {
        Self {
            expectations: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T: StoreEntity, E: 'static> MockRemote<T, E> {
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a `list` call.
    pub fn expect_list(&self) -> ExpectationBuilder<T, E, Vec<T>> {
        ExpectationBuilder::new(self.expectations.clone(), |response| Expectation::List {
            response,
        })
    }

    /// Expects a `create` call.
    pub fn expect_create(&self) -> ExpectationBuilder<T, E, T> {
        ExpectationBuilder::new(self.expectations.clone(), |response| {
            Expectation::Create { response }
        })
    }

    /// Expects an `update` call for `id`.
    pub fn expect_update(&self, id: T::Id) -> ExpectationBuilder<T, E, T> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Update { id, response }
        })
    }

    /// Expects a `delete` call for `id`.
    pub fn expect_delete(&self, id: T::Id) -> ExpectationBuilder<T, E, ()> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Delete { id, response }
        })
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<MockCall<T>> {
        self.calls.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }

    fn next(&self, call: MockCall<T>) -> Queued<T, E> {
        self.calls.lock().unwrap().push(call);
        let mut exps = self.expectations.lock().unwrap();
        match exps.pop_front() {
            Some(queued) => queued,
            None => panic!("Unexpected remote call: no expectations left"),
        }
    }
}

/// Builder returned by the `expect_*` methods.
pub struct ExpectationBuilder<T: StoreEntity, E, V> {
    expectations: Queue<T, E>,
    build: Box<dyn FnOnce(Result<V, E>) -> Expectation<T, E> + Send>,
    release: Option<oneshot::Receiver<()>>,
}

impl<T: StoreEntity, E: 'static, V: 'static> ExpectationBuilder<T, E, V> {
    fn new(
        expectations: Queue<T, E>,
        build: impl FnOnce(Result<V, E>) -> Expectation<T, E> + Send + 'static,
    ) -> Self {
        Self {
            expectations,
            build: Box::new(build),
            release: None,
        }
    }

    /// Holds the response back until `release` fires (or its sender is dropped).
    pub fn held(mut self, release: oneshot::Receiver<()>) -> Self {
        self.release = Some(release);
        self
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: V) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: E) {
        self.push(Err(error));
    }

    fn push(self, response: Result<V, E>) {
        let expectation = (self.build)(response);
        self.expectations.lock().unwrap().push_back(Queued {
            expectation,
            release: self.release,
        });
    }
}

#[async_trait]
impl<T, E> RemoteCollection<T> for MockRemote<T, E>
where
    T: StoreEntity,
    E: std::error::Error + Send + Sync + 'static,
{
    type Error = E;

    async fn list(&self) -> Result<Vec<T>, E> {
        let Queued { expectation, release } = self.next(MockCall::List);
        if let Some(release) = release {
            let _ = release.await;
        }
        match expectation {
            Expectation::List { response } => response,
            other => panic!("Unexpected list call, expected {}", other.name()),
        }
    }

    async fn create(&self, draft: T::Draft) -> Result<T, E> {
        let Queued { expectation, release } = self.next(MockCall::Create(draft));
        if let Some(release) = release {
            let _ = release.await;
        }
        match expectation {
            Expectation::Create { response } => response,
            other => panic!("Unexpected create call, expected {}", other.name()),
        }
    }

    async fn update(&self, id: T::Id, draft: T::Draft) -> Result<T, E> {
        let Queued { expectation, release } = self.next(MockCall::Update(id.clone(), draft));
        if let Some(release) = release {
            let _ = release.await;
        }
        match expectation {
            Expectation::Update { id: expected, response } => {
                assert_eq!(expected, id, "update called for the wrong id");
                response
            }
            other => panic!("Unexpected update call, expected {}", other.name()),
        }
    }

    async fn delete(&self, id: T::Id) -> Result<(), E> {
        let Queued { expectation, release } = self.next(MockCall::Delete(id.clone()));
        if let Some(release) = release {
            let _ = release.await;
        }
        match expectation {
            Expectation::Delete { id: expected, response } => {
                assert_eq!(expected, id, "delete called for the wrong id");
                response
            }
            other => panic!("Unexpected delete call, expected {}", other.name()),
        }
    }
}

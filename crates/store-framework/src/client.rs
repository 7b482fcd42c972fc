//! # Store Handle
//!
//! This module defines the cloneable handle used to dispatch requests to a
//! [`CollectionStore`](crate::CollectionStore) and to subscribe to its snapshots.

use crate::entity::StoreEntity;
use crate::error::StoreError;
use crate::message::{Applied, StoreRequest, Ticket};
use crate::store::Snapshot;
use tokio::sync::{mpsc, oneshot, watch};

/// ## StoreHandle
///
/// The `StoreHandle<T>` is the explicit store object the application root creates and
/// passes to each screen. It has two halves:
///
/// * **Dispatch** – async methods that send a request to the store task and await its reply.
/// * **Subscribe** – [`subscribe`](Self::subscribe) / [`snapshot`](Self::snapshot) give
///   read-only access to the latest published [`Snapshot`].
///
/// Cloning is cheap (a channel sender plus a watch receiver).
pub struct StoreHandle<T: StoreEntity> {
    sender: mpsc::Sender<StoreRequest<T>>,
    subscriber: watch::Receiver<Snapshot<T>>,
}

impl<T: StoreEntity> Clone for StoreHandle<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            subscriber: self.subscriber.clone(),
        }
    }
}

impl<T: StoreEntity> StoreHandle<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>, subscriber: watch::Receiver<Snapshot<T>>) -> Self {
        Self { sender, subscriber }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, StoreError>>) -> StoreRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)?
    }

    /// Marks a `list` call as in flight. The loading flag stays on until the matching
    /// [`end_load`](Self::end_load).
    pub async fn begin_load(&self) -> Result<(), StoreError> {
        self.request(|respond_to| StoreRequest::BeginLoad { respond_to })
            .await
    }

    /// Ends a `list` call. `Some(records)` replaces the collection wholesale; `None`
    /// is the failure path and keeps the previous records. Returns the resulting size.
    pub async fn end_load(&self, records: Option<Vec<T>>) -> Result<usize, StoreError> {
        self.request(|respond_to| StoreRequest::EndLoad {
            records,
            respond_to,
        })
        .await
    }

    /// Reserves a [`Ticket`] for an update of `id`. Must be called *before* the remote call.
    pub async fn begin_update(&self, id: T::Id) -> Result<Ticket<T::Id>, StoreError> {
        self.request(|respond_to| StoreRequest::BeginUpdate { id, respond_to })
            .await
    }

    /// Appends a server-confirmed record.
    pub async fn apply_create(&self, record: T) -> Result<Applied, StoreError> {
        self.request(|respond_to| StoreRequest::ApplyCreate { record, respond_to })
            .await
    }

    /// Replaces the entry with the same id by a server-confirmed record.
    ///
    /// Pass the ticket obtained from [`begin_update`](Self::begin_update); `None` applies
    /// unconditionally (still subject to tombstones).
    pub async fn apply_update(
        &self,
        record: T,
        ticket: Option<Ticket<T::Id>>,
    ) -> Result<Applied, StoreError> {
        self.request(|respond_to| StoreRequest::ApplyUpdate {
            record,
            ticket,
            respond_to,
        })
        .await
    }

    /// Removes a record after a confirmed delete. Absent ids are not an error.
    pub async fn apply_delete(&self, id: T::Id) -> Result<Applied, StoreError> {
        self.request(|respond_to| StoreRequest::ApplyDelete { id, respond_to })
            .await
    }

    /// Returns a detached copy of one record.
    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        self.request(|respond_to| StoreRequest::Get { id, respond_to })
            .await
    }

    /// Asks the store task to stop. Later requests fail with [`StoreError::StoreClosed`].
    pub async fn shutdown(&self) -> Result<(), StoreError> {
        self.sender
            .send(StoreRequest::Shutdown)
            .await
            .map_err(|_| StoreError::StoreClosed)
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> Snapshot<T> {
        self.subscriber.borrow().clone()
    }

    /// A fresh subscription to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<T>> {
        self.subscriber.clone()
    }
}

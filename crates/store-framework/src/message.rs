//! # Store Messages
//!
//! This module defines the message types exchanged between a [`StoreHandle`](crate::StoreHandle)
//! and the [`CollectionStore`](crate::CollectionStore) task that owns the records.

use crate::entity::StoreEntity;
use crate::error::StoreError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by stores.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// A per-record version taken *before* an update call is issued.
///
/// The store hands out a fresh, strictly increasing version for an id every time
/// [`StoreHandle::begin_update`](crate::StoreHandle::begin_update) is called. When the
/// call completes, the ticket is presented with the confirmed record; if a newer ticket
/// was issued in the meantime, the completion is stale and is discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<Id> {
    pub id: Id,
    pub version: u64,
}

/// Outcome of applying a confirmed mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The collection changed and a new snapshot was published.
    Changed,
    /// Nothing to do (e.g. deleting an id that is already gone).
    Unchanged,
    /// A newer mutation for the same record superseded this one; it was dropped.
    Stale,
}

/// Internal message type sent to the store task.
///
/// # Confirm-then-mutate
/// There is no "optimistic" variant here on purpose. Every mutating message carries a
/// record the server has already confirmed. Callers issue the remote call first and only
/// then dispatch the matching `Apply*` message from their own success path.
///
/// - **BeginLoad / EndLoad**: bracket a `list` call; `EndLoad { records: None }` is the
///   failure path and only clears the loading flag.
/// - **BeginUpdate**: reserve a [`Ticket`] for an id before the update call.
/// - **ApplyCreate / ApplyUpdate / ApplyDelete**: phase two of a confirmed mutation.
/// - **Get**: detached copy of one record.
/// - **Shutdown**: stop the task even if handles are still alive.
#[derive(Debug)]
pub enum StoreRequest<T: StoreEntity> {
    BeginLoad {
        respond_to: Response<()>,
    },
    EndLoad {
        records: Option<Vec<T>>,
        respond_to: Response<usize>,
    },
    BeginUpdate {
        id: T::Id,
        respond_to: Response<Ticket<T::Id>>,
    },
    ApplyCreate {
        record: T,
        respond_to: Response<Applied>,
    },
    ApplyUpdate {
        record: T,
        ticket: Option<Ticket<T::Id>>,
        respond_to: Response<Applied>,
    },
    ApplyDelete {
        id: T::Id,
        respond_to: Response<Applied>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Shutdown,
}

//! # Collection Sync
//!
//! `CollectionSync` is the confirm-then-mutate coordinator for one screen and one record
//! kind. It owns an [`EditSession`], a [`StoreHandle`] and a [`RemoteCollection`], and
//! spells out the two phases every mutation goes through:
//!
//! 1. **Issue** the remote call (for updates, after reserving a [`Ticket`](crate::Ticket)).
//! 2. **Apply** the confirmed result to the store, from the call's own success path.
//!
//! If phase 1 fails nothing local changes: the store keeps its records, the session keeps
//! its state and draft, and the error is returned to the caller.
//!
//! ```rust,ignore
//! let mut users = CollectionSync::new(store.clone(), remote);
//! users.load().await?;
//!
//! users.begin_create().name = "Alice".into();
//! let alice = users.submit().await?;          // POST, then append
//!
//! users.begin_edit(alice.id.clone()).await?.email = "alice@example.com".into();
//! users.submit().await?;                      // PUT, then replace
//!
//! users.delete(alice.id).await?;              // DELETE, then remove
//! ```

use crate::client::StoreHandle;
use crate::entity::StoreEntity;
use crate::error::{StoreError, SyncError};
use crate::message::Applied;
use crate::remote::RemoteCollection;
use crate::session::{EditSession, EditState};
use tracing::{debug, instrument, warn};

pub struct CollectionSync<T: StoreEntity, R: RemoteCollection<T>> {
    store: StoreHandle<T>,
    remote: R,
    session: EditSession<T>,
}

impl<T: StoreEntity, R: RemoteCollection<T>> CollectionSync<T, R> {
    pub fn new(store: StoreHandle<T>, remote: R) -> Self {
        Self {
            store,
            remote,
            session: EditSession::new(),
        }
    }

    pub fn store(&self) -> &StoreHandle<T> {
        &self.store
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn session(&self) -> &EditSession<T> {
        &self.session
    }

    /// Replaces the collection with the server's list.
    ///
    /// The loading flag is raised before the call and lowered after it on both paths.
    /// Returns the number of records now in the store.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Result<usize, SyncError<R::Error>> {
        self.store.begin_load().await?;
        match self.remote.list().await {
            Ok(records) => {
                let size = self.store.end_load(Some(records)).await?;
                self.session.reconcile(&self.store.snapshot().records);
                Ok(size)
            }
            Err(e) => {
                warn!(error = %e, "List failed");
                self.store.end_load(None).await?;
                Err(SyncError::Remote(e))
            }
        }
    }

    /// Opens a create session with an empty draft.
    pub fn begin_create(&mut self) -> &mut T::Draft {
        self.session.begin_create()
    }

    /// Opens an edit session on a copy of record `id` as it is in the store right now.
    pub async fn begin_edit(&mut self, id: T::Id) -> Result<&mut T::Draft, SyncError<R::Error>> {
        let record = self
            .store
            .get(id.clone())
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(self.session.begin_edit(&record))
    }

    pub fn draft_mut(&mut self) -> Option<&mut T::Draft> {
        self.session.draft_mut()
    }

    pub fn cancel(&mut self) {
        self.session.cancel();
    }

    /// Submits the open session: *create* when `Creating`, *update* when `Editing(id)`.
    ///
    /// On success the session returns to `Idle` and the confirmed record is returned. A
    /// superseded update is still a success for the caller, but the store keeps the newer
    /// state.
    #[instrument(skip(self))]
    pub async fn submit(&mut self) -> Result<T, SyncError<R::Error>> {
        let draft = self.session.draft().cloned().ok_or(SyncError::NoSession)?;
        match self.session.state().clone() {
            EditState::Idle => Err(SyncError::NoSession),
            EditState::Creating => {
                debug!("Sending create");
                let record = self.remote.create(draft).await.map_err(SyncError::Remote)?;
                if let Err(e) = self.store.apply_create(record.clone()).await {
                    // A load that finished first may already have delivered this record.
                    let delivered = matches!(e, StoreError::DuplicateId(_))
                        && self.already_stored(&record).await?;
                    if !delivered {
                        return Err(e.into());
                    }
                    debug!(id = %record.id(), "Created record already delivered by a load");
                }
                self.session.complete();
                Ok(record)
            }
            EditState::Editing(id) => {
                let ticket = self.store.begin_update(id.clone()).await?;
                debug!(%id, version = ticket.version, "Sending update");
                let record = self
                    .remote
                    .update(id.clone(), draft)
                    .await
                    .map_err(SyncError::Remote)?;
                if record.id() != &id {
                    warn!(%id, returned = %record.id(), "Server returned a different id for update");
                }
                if self.store.apply_update(record.clone(), Some(ticket)).await? == Applied::Stale {
                    debug!(%id, "Update confirmed but superseded locally");
                }
                self.session.complete();
                Ok(record)
            }
        }
    }

    async fn already_stored(&self, record: &T) -> Result<bool, StoreError> {
        let stored = self.store.get(record.id().clone()).await?;
        Ok(stored.is_some_and(|stored| stored.to_draft() == record.to_draft()))
    }

    /// Deletes record `id` remotely, then locally. Closes the session if it was editing it.
    #[instrument(skip(self))]
    pub async fn delete(&mut self, id: T::Id) -> Result<Applied, SyncError<R::Error>> {
        self.remote
            .delete(id.clone())
            .await
            .map_err(SyncError::Remote)?;
        let applied = self.store.apply_delete(id.clone()).await?;
        self.session.record_removed(&id);
        Ok(applied)
    }
}

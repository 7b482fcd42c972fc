//! # Collection Store
//!
//! This module defines the `CollectionStore`, the component that owns the local mirror of
//! one remote collection. It runs as its own task, processes messages sequentially and is
//! the only place the records are ever mutated.

use crate::client::StoreHandle;
use crate::entity::StoreEntity;
use crate::error::StoreError;
use crate::message::{Applied, StoreRequest, Ticket};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

/// Read-only view of a store, published after every change.
///
/// `revision` only moves when the *records* change. Flipping the `loading` flag publishes a
/// new snapshot with the same revision, so projections know they don't need to recompute.
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    pub records: Arc<Vec<T>>,
    pub loading: bool,
    pub revision: u64,
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self {
            records: Arc::new(Vec::new()),
            loading: false,
            revision: 0,
        }
    }
}

impl<T: StoreEntity> Snapshot<T> {
    /// Looks up a record by id.
    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The task that owns a collection of records of one kind.
///
/// # Architecture Note
/// This struct is the "server" half of the store. It owns the records and the receiver end
/// of the channel; [`StoreHandle`] is the cloneable "client" half handed to every screen.
///
/// **Concurrency Model**:
/// The store processes its messages *sequentially*. There is no `Mutex` around the
/// records: exclusive ownership inside the task is what keeps them consistent, and
/// readers only ever see immutable [`Snapshot`]s through a `watch` channel.
///
/// # Invariants
///
/// * Ids are unique. A confirmed create for an existing id is rejected with
///   [`StoreError::DuplicateId`]; duplicate ids inside a `list` response are dropped.
/// * Order is insertion order; a load adopts the server's order.
/// * A confirmed delete tombstones the id. Later update completions and later loads
///   can't bring it back. The tombstone is lifted by a confirmed create for the same id
///   (servers that hand out `max + 1` reuse ids), or by a load whose response no longer
///   lists the id.
/// * An update completion is applied only if its [`Ticket`] is still the newest one
///   issued for that id. Deletes and creates also advance the version, so tickets taken
///   for an earlier incarnation of an id never apply to a later one.
///
/// `versions` keeps one counter per id ever updated, deleted or created and is never
/// pruned; dropping a counter would let an old ticket match again.
pub struct CollectionStore<T: StoreEntity> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    records: Arc<Vec<T>>,
    versions: HashMap<T::Id, u64>,
    tombstones: HashSet<T::Id>,
    loads_in_flight: usize,
    revision: u64,
    publisher: watch::Sender<Snapshot<T>>,
}

impl<T: StoreEntity> CollectionStore<T> {
    /// Creates a new `CollectionStore` and its associated `StoreHandle`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the request channel. If the channel is full,
    ///   calls through the handle wait until there is space.
    ///
    /// # Returns
    ///
    /// A tuple containing:
    /// 1. The `CollectionStore` instance, which must be driven via `.run()`.
    /// 2. The `StoreHandle`, which can be cloned and passed to every screen.
    pub fn new(buffer_size: usize) -> (Self, StoreHandle<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (publisher, subscriber) = watch::channel(Snapshot::default());
        let store = Self {
            receiver,
            records: Arc::new(Vec::new()),
            versions: HashMap::new(),
            tombstones: HashSet::new(),
            loads_in_flight: 0,
            revision: 0,
            publisher,
        };
        let handle = StoreHandle::new(sender, subscriber);
        (store, handle)
    }

    /// Runs the store's event loop until every handle is dropped or `Shutdown` arrives.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "User" instead of "admin_console::model::user::User")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::BeginLoad { respond_to } => {
                    self.loads_in_flight += 1;
                    debug!(entity_type, in_flight = self.loads_in_flight, "Load started");
                    self.publish();
                    let _ = respond_to.send(Ok(()));
                }
                StoreRequest::EndLoad {
                    records,
                    respond_to,
                } => {
                    self.loads_in_flight = self.loads_in_flight.saturating_sub(1);
                    match records {
                        Some(records) => {
                            self.replace(records, entity_type);
                            info!(entity_type, size = self.records.len(), revision = self.revision, "Loaded");
                        }
                        None => {
                            warn!(entity_type, size = self.records.len(), "Load failed, keeping previous records");
                        }
                    }
                    self.publish();
                    let _ = respond_to.send(Ok(self.records.len()));
                }
                StoreRequest::BeginUpdate { id, respond_to } => {
                    let version = self.bump_version(&id);
                    debug!(entity_type, %id, version, "Ticket issued");
                    let _ = respond_to.send(Ok(Ticket { id, version }));
                }
                StoreRequest::ApplyCreate { record, respond_to } => {
                    let result = self.apply_create(record, entity_type);
                    let _ = respond_to.send(result);
                }
                StoreRequest::ApplyUpdate {
                    record,
                    ticket,
                    respond_to,
                } => {
                    let result = self.apply_update(record, ticket, entity_type);
                    let _ = respond_to.send(result);
                }
                StoreRequest::ApplyDelete { id, respond_to } => {
                    let result = self.apply_delete(id, entity_type);
                    let _ = respond_to.send(Ok(result));
                }
                StoreRequest::Get { id, respond_to } => {
                    let item = self.records.iter().find(|r| r.id() == &id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                StoreRequest::Shutdown => {
                    debug!(entity_type, "Shutdown requested");
                    break;
                }
            }
        }

        info!(entity_type, size = self.records.len(), "Shutdown");
    }

    fn replace(&mut self, records: Vec<T>, entity_type: &str) {
        let listed: HashSet<T::Id> = records.iter().map(|r| r.id().clone()).collect();
        self.tombstones.retain(|id| {
            let still_listed = listed.contains(id);
            if !still_listed {
                debug!(entity_type, %id, "Server no longer lists deleted record, lifting tombstone");
            }
            still_listed
        });

        let mut seen = HashSet::with_capacity(records.len());
        let mut kept = Vec::with_capacity(records.len());
        for record in records {
            let id = record.id().clone();
            if self.tombstones.contains(&id) {
                debug!(entity_type, %id, "Dropping deleted record from load");
                continue;
            }
            if !seen.insert(id.clone()) {
                error!(entity_type, %id, "Duplicate id in list response, keeping first");
                continue;
            }
            kept.push(record);
        }
        self.records = Arc::new(kept);
        self.revision += 1;
    }

    fn apply_create(&mut self, record: T, entity_type: &str) -> Result<Applied, StoreError> {
        let id = record.id().clone();
        if self.records.iter().any(|r| r.id() == &id) {
            error!(entity_type, %id, "Confirmed create collides with an existing record");
            return Err(StoreError::DuplicateId(id.to_string()));
        }
        if self.tombstones.remove(&id) {
            debug!(entity_type, %id, "Id reused by a confirmed create");
        }
        self.bump_version(&id);
        Arc::make_mut(&mut self.records).push(record);
        self.revision += 1;
        self.publish();
        info!(entity_type, %id, size = self.records.len(), "Created");
        Ok(Applied::Changed)
    }

    fn apply_update(
        &mut self,
        record: T,
        ticket: Option<Ticket<T::Id>>,
        entity_type: &str,
    ) -> Result<Applied, StoreError> {
        let id = record.id().clone();
        if self.tombstones.contains(&id) {
            warn!(entity_type, %id, "Update completed after delete, discarding");
            return Ok(Applied::Stale);
        }
        if let Some(ticket) = ticket {
            let current = self.versions.get(&ticket.id).copied().unwrap_or(0);
            if ticket.version != current {
                warn!(entity_type, %id, version = ticket.version, current, "Superseded update, discarding");
                return Ok(Applied::Stale);
            }
        }
        let Some(position) = self.records.iter().position(|r| r.id() == &id) else {
            error!(entity_type, %id, "Confirmed update for a record missing from the store");
            return Err(StoreError::NotFound(id.to_string()));
        };
        Arc::make_mut(&mut self.records)[position] = record;
        self.revision += 1;
        self.publish();
        info!(entity_type, %id, "Updated");
        Ok(Applied::Changed)
    }

    fn apply_delete(&mut self, id: T::Id, entity_type: &str) -> Applied {
        self.bump_version(&id);
        self.tombstones.insert(id.clone());
        match self.records.iter().position(|r| r.id() == &id) {
            Some(position) => {
                Arc::make_mut(&mut self.records).remove(position);
                self.revision += 1;
                self.publish();
                info!(entity_type, %id, size = self.records.len(), "Deleted");
                Applied::Changed
            }
            None => {
                debug!(entity_type, %id, "Delete for absent record");
                Applied::Unchanged
            }
        }
    }

    fn bump_version(&mut self, id: &T::Id) -> u64 {
        let version = self.versions.entry(id.clone()).or_insert(0);
        *version += 1;
        *version
    }

    fn publish(&self) {
        self.publisher.send_replace(Snapshot {
            records: Arc::clone(&self.records),
            loading: self.loads_in_flight > 0,
            revision: self.revision,
        });
    }
}

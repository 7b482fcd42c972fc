//! # Store Framework
//!
//! This crate provides the building blocks for keeping a local, in-memory mirror of a
//! remote collection consistent with the server that owns it. It is the reusable core
//! behind the admin console's Users, Products and Profile screens.
//!
//! ## Confirm, then mutate
//!
//! Nothing in a [`CollectionStore`] changes because a user *asked* for a change. It
//! changes because the server *confirmed* one:
//!
//! 1. A screen issues a call through a [`RemoteCollection`].
//! 2. Only from that call's success path does it dispatch the confirmed record to the
//!    store via its [`StoreHandle`].
//! 3. The store publishes a new [`Snapshot`]; every [`Projection`] subscribed to it
//!    recomputes; views re-render.
//!
//! On failure, step 2 never happens. The store and the [`EditSession`] are exactly what
//! they were, and the error goes back to the screen. [`CollectionSync`] packages the two
//! phases so each screen doesn't re-implement them.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`StoreEntity`], [`Filterable`]) - record shape, id and draft
//! 2. **State Layer** ([`CollectionStore`]) - one task per kind owning the records
//! 3. **Interface Layer** ([`StoreHandle`]) - dispatch + subscribe, cheap to clone
//! 4. **Coordination Layer** ([`CollectionSync`], [`EditSession`]) - the two-phase protocol
//! 5. **Derived Views** ([`project`], [`Projection`]) - pure filtering
//!
//! ## Stale completions
//!
//! Two mutating calls for the same record can be in flight at once (two screens share a
//! store). The store defends against the classic "slow update resurrects a deleted
//! record" race:
//!
//! - updates reserve a per-record [`Ticket`] before the call; a completion whose ticket is
//!   no longer the newest is dropped as [`Applied::Stale`];
//! - confirmed deletes tombstone the id, so no later update or load brings it back.
//!
//! ## Concurrency Model
//!
//! - Each store runs in its own Tokio task and handles requests one at a time
//! - Readers get immutable snapshots over a `watch` channel; no locks around records
//! - There is no retry, batching or cancellation anywhere in the framework
//!
//! ## Testing
//!
//! [`mock::MockRemote`] implements [`RemoteCollection`] from a queue of expected calls,
//! including held responses to control completion order. See the [`mock`] module.

pub mod client;
pub mod entity;
pub mod error;
pub mod filter;
pub mod message;
pub mod mock;
pub mod remote;
pub mod session;
pub mod store;
pub mod sync;
pub mod tracing;

// Re-export core types for convenience
pub use client::StoreHandle;
pub use entity::StoreEntity;
pub use error::{StoreError, SyncError};
pub use filter::{project, FilterCriteria, Filterable, Projection};
pub use message::{Applied, Response, StoreRequest, Ticket};
pub use remote::RemoteCollection;
pub use session::{EditSession, EditState};
pub use store::{CollectionStore, Snapshot};
pub use sync::CollectionSync;

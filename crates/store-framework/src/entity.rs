//! # StoreEntity Trait
//!
//! The `StoreEntity` trait defines the contract every record kind (User, Product, …) must
//! implement to be mirrored by a [`CollectionStore`](crate::CollectionStore). It names the
//! identifier type, the draft type used by create/edit forms, and how to take a detached
//! copy of a record's fields.
//!
//! # Architecture Note
//! By defining one contract that all record kinds satisfy, the store loop, the edit
//! session and the sync coordinator are written *once* and reused for every kind.
//!
//! We use "Associated Types" (`type Id`, `type Draft`) to enforce type safety.
//! A `User` store only ever accepts a `UserDraft`; you can't accidentally submit a
//! `ProductDraft` to it. The compiler prevents this class of bugs entirely.
//!
//! # Closed record shapes
//! Records are plain structs with fixed fields, never open maps. A missing field is a
//! compile error, not a runtime surprise on some screen.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any record kind must implement to be managed by a `CollectionStore`.
///
/// # Identity
/// `id()` returns the server-assigned identifier. Records only enter a store after the
/// server confirmed them, so the id is always the authoritative one.
///
/// # Drafts
/// `Draft` is the staging buffer used by create and edit forms. `Default` must produce
/// the kind-specific empty form. `to_draft()` must return an independent copy so that
/// editing a draft never reaches back into the collection.
pub trait StoreEntity: Clone + Send + Sync + Debug + 'static {
    /// The unique identifier for this record (e.g., a `u64` newtype).
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The mutable staging copy of a record's fields, without identity.
    type Draft: Clone + Default + PartialEq + Send + Sync + Debug;

    /// The record's identifier.
    fn id(&self) -> &Self::Id;

    /// A detached copy of this record's editable fields.
    fn to_draft(&self) -> Self::Draft;
}

//! # Framework Errors
//!
//! This module defines the common error types used throughout the store framework.
//! By centralizing error definitions, we ensure consistent error handling across
//! all stores, sessions and sync coordinators.

/// Errors raised by a [`CollectionStore`](crate::CollectionStore) or while talking to it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("Store closed")]
    StoreClosed,
    #[error("Store dropped response channel")]
    StoreDropped,
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Duplicate record id: {0}")]
    DuplicateId(String),
}

/// Errors surfaced by [`CollectionSync`](crate::CollectionSync) operations.
///
/// `E` is the remote collection's own error type. A `Remote` failure always means the
/// local store and edit session were left exactly as they were before the call.
#[derive(Debug, thiserror::Error)]
pub enum SyncError<E> {
    #[error(transparent)]
    Remote(E),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("No create or edit session is active")]
    NoSession,
}

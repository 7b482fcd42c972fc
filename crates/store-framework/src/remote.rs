//! # RemoteCollection Trait
//!
//! The seam between the local store and the server that owns the collection. Every
//! method is one network round trip; none of them touch local state.
use crate::entity::StoreEntity;
use async_trait::async_trait;

/// Create/read/update/delete calls against a remote collection of `T`.
///
/// On success `create` and `update` return the server's authoritative representation of
/// the record (the server assigns ids and may normalize fields). Implementations must not
/// retry on their own; a failure is reported once and the caller decides what to do.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use store_framework::{RemoteCollection, StoreEntity};
///
/// #[derive(Clone, Debug)]
/// struct Tag { id: u32, label: String }
///
/// #[derive(Clone, Debug, Default, PartialEq)]
/// struct TagDraft { label: String }
///
/// impl StoreEntity for Tag {
///     type Id = u32;
///     type Draft = TagDraft;
///     fn id(&self) -> &u32 { &self.id }
///     fn to_draft(&self) -> TagDraft { TagDraft { label: self.label.clone() } }
/// }
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("offline")]
/// struct Offline;
///
/// struct OfflineTags;
///
/// #[async_trait]
/// impl RemoteCollection<Tag> for OfflineTags {
///     type Error = Offline;
///     async fn list(&self) -> Result<Vec<Tag>, Offline> { Err(Offline) }
///     async fn create(&self, _: TagDraft) -> Result<Tag, Offline> { Err(Offline) }
///     async fn update(&self, _: u32, _: TagDraft) -> Result<Tag, Offline> { Err(Offline) }
///     async fn delete(&self, _: u32) -> Result<(), Offline> { Err(Offline) }
/// }
/// ```
#[async_trait]
pub trait RemoteCollection<T: StoreEntity>: Send + Sync {
    /// The failure type of a single call.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the whole collection.
    async fn list(&self) -> Result<Vec<T>, Self::Error>;

    /// Create a record from a draft; the server assigns the id.
    async fn create(&self, draft: T::Draft) -> Result<T, Self::Error>;

    /// Overwrite record `id` with the draft's fields.
    async fn update(&self, id: T::Id, draft: T::Draft) -> Result<T, Self::Error>;

    /// Delete record `id`.
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error>;
}

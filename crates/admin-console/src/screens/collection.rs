//! # Collection Screen
//!
//! The list-with-editor screen shared by Users and Products: a [`CollectionSync`] for the
//! two-phase mutations, a [`Projection`] for the search box and price range, and a
//! [`Notifier`] for the outcome of every remote call.

use crate::model::{Product, Resource, User};
use crate::notifications::Notifier;
use crate::remote::HttpResourceClient;
use store_framework::{
    Applied, CollectionSync, EditSession, EditState, FilterCriteria, Projection,
    RemoteCollection, Snapshot, StoreHandle, SyncError,
};
use tracing::instrument;

pub struct CollectionScreen<T: Resource, R: RemoteCollection<T>> {
    sync: CollectionSync<T, R>,
    projection: Projection<T>,
    notifier: Notifier,
}

pub type UsersScreen<R = HttpResourceClient<User>> = CollectionScreen<User, R>;
pub type ProductsScreen<R = HttpResourceClient<Product>> = CollectionScreen<Product, R>;

impl<T: Resource, R: RemoteCollection<T>> CollectionScreen<T, R> {
    pub fn new(store: StoreHandle<T>, remote: R, notifier: Notifier) -> Self {
        let projection = Projection::new(store.subscribe());
        Self {
            sync: CollectionSync::new(store, remote),
            projection,
            notifier,
        }
    }

    /// Everything the list view renders from: records plus the loading flag.
    pub fn snapshot(&self) -> Snapshot<T> {
        self.sync.store().snapshot()
    }

    pub fn is_loading(&self) -> bool {
        self.snapshot().loading
    }

    pub fn session(&self) -> &EditSession<T> {
        self.sync.session()
    }

    pub fn remote(&self) -> &R {
        self.sync.remote()
    }

    pub fn filter(&self) -> &FilterCriteria {
        self.projection.criteria()
    }

    /// Changes the search criteria and returns the rows now visible.
    pub fn set_filter(&mut self, criteria: FilterCriteria) -> &[T] {
        self.projection.set_criteria(criteria)
    }

    /// The filtered rows, in collection order.
    pub fn visible(&mut self) -> &[T] {
        self.projection.view()
    }

    #[instrument(skip(self), fields(kind = %T::KIND))]
    pub async fn load(&mut self) -> Result<usize, SyncError<R::Error>> {
        let result = self.sync.load().await;
        match &result {
            Ok(_) => self
                .notifier
                .success(format!("{} loaded successfully!", plural(T::KIND.singular()))),
            Err(_) => self
                .notifier
                .error(format!("Failed to fetch {}", T::KIND.path())),
        }
        result
    }

    pub fn begin_create(&mut self) -> &mut T::Draft {
        self.sync.begin_create()
    }

    pub async fn begin_edit(&mut self, id: T::Id) -> Result<&mut T::Draft, SyncError<R::Error>> {
        self.sync.begin_edit(id).await
    }

    pub fn draft_mut(&mut self) -> Option<&mut T::Draft> {
        self.sync.draft_mut()
    }

    pub fn cancel(&mut self) {
        self.sync.cancel();
    }

    /// Saves the open form: create or update depending on the session.
    #[instrument(skip(self), fields(kind = %T::KIND))]
    pub async fn submit(&mut self) -> Result<T, SyncError<R::Error>> {
        let verb = match self.sync.session().state() {
            EditState::Editing(_) => "update",
            _ => "create",
        };
        let result = self.sync.submit().await;
        match &result {
            Ok(_) => self.notifier.success(format!(
                "{} {}d successfully!",
                T::KIND.singular(),
                verb
            )),
            Err(SyncError::NoSession) => {}
            Err(_) => self.notifier.error(format!(
                "Failed to {} {}",
                verb,
                T::KIND.singular().to_lowercase()
            )),
        }
        result
    }

    #[instrument(skip(self), fields(kind = %T::KIND))]
    pub async fn delete(&mut self, id: T::Id) -> Result<Applied, SyncError<R::Error>> {
        let result = self.sync.delete(id).await;
        match &result {
            Ok(_) => self
                .notifier
                .success(format!("{} deleted successfully!", T::KIND.singular())),
            Err(_) => self.notifier.error(format!(
                "Failed to delete {}",
                T::KIND.singular().to_lowercase()
            )),
        }
        result
    }
}

fn plural(singular: &str) -> String {
    format!("{}s", singular)
}

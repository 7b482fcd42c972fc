use crate::model::User;
use crate::notifications::Notifier;
use crate::remote::{HttpResourceClient, UploadClient, UploadFile};
use crate::screens::{CollectionScreen, UsersScreen};
use crate::upload::UploadError;
use store_framework::{RemoteCollection, StoreHandle, SyncError};
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Error)]
pub enum ProfileError<E: std::error::Error + 'static> {
    #[error("Select a user before uploading an avatar")]
    NoSelection,

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Sync(#[from] SyncError<E>),
}

/// User list editing plus the avatar upload flow.
///
/// The users list is shared with the Users screen through the same store, so an avatar
/// saved here shows up there and vice versa.
pub struct ProfileScreen<R: RemoteCollection<User> = HttpResourceClient<User>> {
    users: UsersScreen<R>,
    uploads: UploadClient,
    notifier: Notifier,
}

impl<R: RemoteCollection<User>> ProfileScreen<R> {
    pub fn new(store: StoreHandle<User>, remote: R, uploads: UploadClient, notifier: Notifier) -> Self {
        Self {
            users: CollectionScreen::new(store, remote, notifier.clone()),
            uploads,
            notifier,
        }
    }

    pub fn users(&self) -> &UsersScreen<R> {
        &self.users
    }

    pub fn users_mut(&mut self) -> &mut UsersScreen<R> {
        &mut self.users
    }

    /// Uploads `file`, then saves its stored reference as the selected user's avatar.
    ///
    /// Needs an open edit session (the selected user). The upload runs first; only on
    /// success is the draft's `avatar` set and the session submitted as an update, so a
    /// failed upload changes nothing. If the update fails the draft keeps the new
    /// reference and can be saved again.
    #[instrument(skip(self, file))]
    pub async fn upload_avatar(&mut self, file: Option<UploadFile>) -> Result<User, ProfileError<R::Error>> {
        let Some(id) = self.users.session().editing_id().copied() else {
            return Err(ProfileError::NoSelection);
        };

        let reference = match self.uploads.upload(file).await {
            Ok(reference) => reference,
            Err(e) => {
                self.notifier.error("Failed to upload avatar");
                return Err(e.into());
            }
        };
        info!(%id, %reference, "Avatar stored, updating user");

        if let Some(draft) = self.users.draft_mut() {
            draft.avatar = reference.into();
        }
        let user = self.users.submit().await?;
        self.notifier.success("Avatar uploaded!");
        Ok(user)
    }
}

//! # Edit Session
//!
//! Tracks the single "currently editing" record of a screen together with its draft
//! buffer, and decides whether a submit means *create* or *update*.
//!
//! ```text
//!            begin_create              complete / cancel
//!   Idle ─────────────────▶ Creating ─────────────────────▶ Idle
//!     │
//!     │      begin_edit(id)            complete / cancel / record_removed(id)
//!     └───────────────────▶ Editing(id) ───────────────────────────────────▶ Idle
//! ```
//!
//! Entering a new session while one is active first collapses to `Idle` and discards the
//! unsaved draft. Asking the user whether to discard is the caller's job; use
//! [`EditSession::is_dirty`] to know when to ask.

use crate::entity::StoreEntity;
use tracing::debug;

/// The three states of an [`EditSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditState<Id> {
    Idle,
    Creating,
    Editing(Id),
}

/// Selection plus draft for one record kind.
#[derive(Debug)]
pub struct EditSession<T: StoreEntity> {
    state: EditState<T::Id>,
    draft: Option<T::Draft>,
    baseline: Option<T::Draft>,
}

impl<T: StoreEntity> Default for EditSession<T> {
    fn default() -> Self {
        Self {
            state: EditState::Idle,
            draft: None,
            baseline: None,
        }
    }
}

impl<T: StoreEntity> EditSession<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditState<T::Id> {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == EditState::Idle
    }

    /// The id under edit, if any.
    pub fn editing_id(&self) -> Option<&T::Id> {
        match &self.state {
            EditState::Editing(id) => Some(id),
            _ => None,
        }
    }

    pub fn draft(&self) -> Option<&T::Draft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut T::Draft> {
        self.draft.as_mut()
    }

    /// True when the draft differs from what the session started with.
    pub fn is_dirty(&self) -> bool {
        self.draft != self.baseline
    }

    /// `Idle -> Creating` with an empty draft.
    pub fn begin_create(&mut self) -> &mut T::Draft {
        self.collapse();
        debug!("Edit session: creating");
        self.state = EditState::Creating;
        self.baseline = Some(T::Draft::default());
        self.draft.insert(T::Draft::default())
    }

    /// `Idle -> Editing(id)` with a detached copy of the record's fields.
    pub fn begin_edit(&mut self, record: &T) -> &mut T::Draft {
        self.collapse();
        let id = record.id().clone();
        debug!(%id, "Edit session: editing");
        self.state = EditState::Editing(id);
        self.baseline = Some(record.to_draft());
        self.draft.insert(record.to_draft())
    }

    /// Explicit cancel. Discards the draft.
    pub fn cancel(&mut self) {
        if !self.is_idle() {
            debug!("Edit session: cancelled");
        }
        self.collapse();
    }

    /// Back to `Idle` after a confirmed create or update.
    pub fn complete(&mut self) {
        self.collapse();
    }

    /// Forced transition when record `id` was deleted. Returns true if the session was
    /// editing it.
    pub fn record_removed(&mut self, id: &T::Id) -> bool {
        if self.editing_id() == Some(id) {
            debug!(%id, "Edit session: record removed while editing");
            self.collapse();
            true
        } else {
            false
        }
    }

    /// Drops an `Editing(id)` session whose record no longer exists in `records`.
    pub fn reconcile(&mut self, records: &[T]) -> bool {
        let Some(id) = self.editing_id().cloned() else {
            return false;
        };
        if records.iter().any(|r| r.id() == &id) {
            return false;
        }
        self.record_removed(&id)
    }

    fn collapse(&mut self) {
        self.state = EditState::Idle;
        self.draft = None;
        self.baseline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: u32,
        title: String,
    }

    #[derive(Clone, Debug, Default, PartialEq)]
    struct NoteDraft {
        title: String,
    }

    impl StoreEntity for Note {
        type Id = u32;
        type Draft = NoteDraft;

        fn id(&self) -> &u32 {
            &self.id
        }

        fn to_draft(&self) -> NoteDraft {
            NoteDraft {
                title: self.title.clone(),
            }
        }
    }

    fn note(id: u32, title: &str) -> Note {
        Note {
            id,
            title: title.to_string(),
        }
    }

    #[test]
    fn begin_create_starts_from_defaults() {
        let mut session = EditSession::<Note>::new();
        session.begin_create().title = "draft".into();
        assert_eq!(session.state(), &EditState::Creating);
        assert!(session.is_dirty());

        session.begin_create();
        assert_eq!(session.draft(), Some(&NoteDraft::default()));
        assert!(!session.is_dirty());
    }

    #[test]
    fn draft_is_a_copy_of_the_record() {
        let mut session = EditSession::<Note>::new();
        let mut original = note(5, "Red Shoe");
        session.begin_edit(&original);

        original.title = "changed elsewhere".into();
        assert_eq!(session.draft().unwrap().title, "Red Shoe");

        session.draft_mut().unwrap().title = "Blue Shoe".into();
        assert_eq!(original.title, "changed elsewhere");
        assert_eq!(session.editing_id(), Some(&5));
    }

    #[test]
    fn second_session_collapses_the_first() {
        let mut session = EditSession::<Note>::new();
        session.begin_edit(&note(1, "a")).title = "unsaved".into();
        session.begin_edit(&note(2, "b"));
        assert_eq!(session.state(), &EditState::Editing(2));
        assert_eq!(session.draft().unwrap().title, "b");
    }

    #[test]
    fn removal_of_edited_record_forces_idle() {
        let mut session = EditSession::<Note>::new();
        session.begin_edit(&note(3, "c"));
        assert!(!session.record_removed(&4));
        assert!(session.record_removed(&3));
        assert!(session.is_idle());
        assert!(session.draft().is_none());
    }

    #[test]
    fn reconcile_keeps_session_when_record_is_present() {
        let mut session = EditSession::<Note>::new();
        session.begin_edit(&note(3, "c"));
        assert!(!session.reconcile(&[note(3, "c")]));
        assert!(session.reconcile(&[note(1, "a")]));
        assert!(session.is_idle());
    }

    #[test]
    fn cancel_from_creating() {
        let mut session = EditSession::<Note>::new();
        session.begin_create();
        session.cancel();
        assert!(session.is_idle());
        assert!(!session.is_dirty());
    }
}

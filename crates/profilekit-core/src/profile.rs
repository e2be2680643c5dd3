//! Form state for profile editing.
//!
//! `ProfileForm` holds the editable drafts a consumer binds its inputs to.
//! Drafts are re-derived from the user value whenever it changes, so a
//! successful update (which replaces the whole user) snaps the form back to
//! the server's copy.

use crate::models::{ProfilePatch, User};

#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub display_name: String,
    pub bio: String,
    editing: bool,
    saving: bool,
}

impl ProfileForm {
    pub fn from_user(user: &User) -> Self {
        let mut form = Self::default();
        form.sync_from(user);
        form
    }

    /// Re-derive drafts from the user value. Call whenever the user changes.
    pub fn sync_from(&mut self, user: &User) {
        self.display_name = user.display_name.clone().unwrap_or_default();
        self.bio = user.bio.clone().unwrap_or_default();
    }

    pub fn begin_edit(&mut self) {
        self.editing = true;
    }

    /// Discard drafts and leave edit mode.
    pub fn cancel(&mut self, user: &User) {
        self.sync_from(user);
        self.editing = false;
    }

    /// Build the wire patch from the current drafts.
    pub fn patch(&self) -> ProfilePatch {
        ProfilePatch {
            display_name: self.display_name.clone(),
            bio: self.bio.clone(),
        }
    }

    /// Whether the drafts differ from the user value they were derived from.
    pub fn is_dirty(&self, user: &User) -> bool {
        self.display_name != user.display_name.as_deref().unwrap_or_default()
            || self.bio != user.bio.as_deref().unwrap_or_default()
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn set_saving(&mut self, saving: bool) {
        self.saving = saving;
    }
}

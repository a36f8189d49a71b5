//! The user browser: directory, search, expansion, playback overlay and the
//! intake form, driven entirely by synchronous UI events.
//!
//! Operations only change local state. Anything with a side effect (probing a
//! video, handing a submission to a sink) is returned to the caller.

use shared::{
    domain::{IntakeSubmission, UserId, UserRecord},
    error::IntakeValidationError,
};
use thiserror::Error;

use crate::{
    directory::Directory,
    filter::SearchState,
    intake::IntakeForm,
    overlay::{VideoOverlay, VideoRequest},
    selection::Selection,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayError {
    #[error("no user with id {0}")]
    UnknownRecord(UserId),
    #[error("user {0} must be expanded before playing")]
    NotExpanded(UserId),
    #[error("user {0} has no playable clip")]
    NoClip(UserId),
}

#[derive(Debug, Clone, Default)]
pub struct UserBrowser {
    directory: Directory,
    search: SearchState,
    selection: Selection,
    overlay: VideoOverlay,
    intake: IntakeForm,
}

impl UserBrowser {
    pub fn new(directory: Directory) -> Self {
        Self {
            directory,
            search: SearchState::default(),
            selection: Selection::default(),
            overlay: VideoOverlay::default(),
            intake: IntakeForm::default(),
        }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn search_term(&self) -> &str {
        self.search.term()
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        if self.search.set_term(term) {
            tracing::trace!(term = self.search.term(), "search term changed");
        }
    }

    pub fn visible_records(&mut self) -> Vec<&UserRecord> {
        self.search.visible(self.directory.records())
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn click_record(&mut self, id: &UserId) {
        self.selection.toggle(id);
    }

    pub fn is_expanded(&self, id: &UserId) -> bool {
        self.selection.is_expanded(id)
    }

    /// Opens the overlay for an expanded clip record and returns the reference
    /// to load. Selection is never touched.
    pub fn play(&mut self, id: &UserId) -> Result<VideoRequest, PlayError> {
        let record = self
            .directory
            .get(id)
            .ok_or_else(|| PlayError::UnknownRecord(id.clone()))?;
        if !self.selection.is_expanded(id) {
            return Err(PlayError::NotExpanded(id.clone()));
        }
        let url = record
            .playable_video()
            .ok_or_else(|| PlayError::NoClip(id.clone()))?
            .to_string();
        let request = self.overlay.open(url);
        tracing::debug!(
            user_id = %id,
            session = request.session,
            url = %request.url,
            "video overlay opened"
        );
        Ok(request)
    }

    /// Reloads whatever the overlay shows, independent of the list.
    pub fn retry_overlay(&mut self) -> Option<VideoRequest> {
        let request = self.overlay.reload()?;
        tracing::debug!(
            session = request.session,
            url = %request.url,
            "retrying video load"
        );
        Some(request)
    }

    pub fn overlay(&self) -> &VideoOverlay {
        &self.overlay
    }

    pub fn video_loaded(&mut self, session: u64) -> bool {
        self.overlay.mark_loaded(session)
    }

    pub fn video_failed(&mut self, session: u64, reason: impl Into<String>) -> bool {
        let reason = reason.into();
        let applied = self.overlay.mark_failed(session, reason.clone());
        if applied {
            let url = self.overlay.current_url().unwrap_or_default();
            tracing::warn!(url, reason = %reason, "video failed to load");
        }
        applied
    }

    /// True while the overlay or the intake form is showing.
    pub fn dialog_open(&self) -> bool {
        self.overlay.is_open() || self.intake.is_open()
    }

    pub fn close_overlay(&mut self) {
        self.overlay.close();
    }

    pub fn intake(&self) -> &IntakeForm {
        &self.intake
    }

    pub fn intake_mut(&mut self) -> &mut IntakeForm {
        &mut self.intake
    }

    pub fn open_intake(&mut self) {
        self.intake.open();
    }

    pub fn close_intake(&mut self) {
        self.intake.close();
    }

    pub fn submit_intake(&mut self) -> Result<IntakeSubmission, IntakeValidationError> {
        self.intake.submit()
    }
}

#[cfg(test)]
#[path = "tests/browser_tests.rs"]
mod tests;

//! Playback overlay state.

pub const VIDEO_LOAD_ERROR_MESSAGE: &str = "Error loading video. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaLoadState {
    Pending,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlaySession {
    pub id: u64,
    pub video_url: String,
    pub load: MediaLoadState,
}

/// A reference to load, tagged with the overlay session that asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRequest {
    pub session: u64,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoOverlay {
    session: Option<OverlaySession>,
    last_session: u64,
}

impl VideoOverlay {
    /// Opens (or re-targets) the overlay and clears any previous load error.
    /// Every open starts a new session, even for the same reference.
    pub fn open(&mut self, video_url: impl Into<String>) -> VideoRequest {
        self.last_session += 1;
        let url = video_url.into();
        self.session = Some(OverlaySession {
            id: self.last_session,
            video_url: url.clone(),
            load: MediaLoadState::Pending,
        });
        VideoRequest {
            session: self.last_session,
            url,
        }
    }

    /// Starts a fresh load of the reference currently shown.
    pub fn reload(&mut self) -> Option<VideoRequest> {
        let url = self.current_url()?.to_string();
        Some(self.open(url))
    }

    pub fn close(&mut self) {
        self.session = None;
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&OverlaySession> {
        self.session.as_ref()
    }

    pub fn current_url(&self) -> Option<&str> {
        self.session
            .as_ref()
            .map(|session| session.video_url.as_str())
    }

    pub fn load_failed(&self) -> bool {
        matches!(
            self.session,
            Some(OverlaySession {
                load: MediaLoadState::Failed(_),
                ..
            })
        )
    }

    /// Returns false when the result belongs to a session no longer shown.
    pub fn mark_loaded(&mut self, session: u64) -> bool {
        self.apply_result(session, MediaLoadState::Ready)
    }

    pub fn mark_failed(&mut self, session: u64, reason: impl Into<String>) -> bool {
        self.apply_result(session, MediaLoadState::Failed(reason.into()))
    }

    fn apply_result(&mut self, session: u64, load: MediaLoadState) -> bool {
        match self.session.as_mut() {
            Some(current) if current.id == session => {
                current.load = load;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.youtube.com/embed/dQw4w9WgXcQ";

    #[test]
    fn opening_clears_previous_error() {
        let mut overlay = VideoOverlay::default();
        let first = overlay.open(URL);
        assert!(overlay.mark_failed(first.session, "timeout"));
        assert!(overlay.load_failed());

        overlay.open(URL);
        assert!(!overlay.load_failed());
        assert_eq!(
            overlay.session().map(|s| &s.load),
            Some(&MediaLoadState::Pending)
        );
    }

    #[test]
    fn failure_keeps_overlay_open_until_closed() {
        let mut overlay = VideoOverlay::default();
        let request = overlay.open(URL);
        overlay.mark_failed(request.session, "404");
        assert!(overlay.is_open());
        assert_eq!(overlay.current_url(), Some(URL));
        overlay.close();
        assert!(!overlay.is_open());
        assert!(!overlay.load_failed());
    }

    #[test]
    fn stale_results_are_ignored() {
        let mut overlay = VideoOverlay::default();
        let a = overlay.open("https://a.example/video");
        let b = overlay.open("https://b.example/video");
        assert!(!overlay.mark_failed(a.session, "late failure"));
        assert!(!overlay.load_failed());
        assert!(overlay.mark_loaded(b.session));

        overlay.close();
        assert!(!overlay.mark_loaded(b.session));
    }

    #[test]
    fn earlier_session_with_same_reference_is_stale() {
        let mut overlay = VideoOverlay::default();
        let first = overlay.open(URL);
        overlay.close();
        let second = overlay.open(URL);
        assert_ne!(first.session, second.session);

        assert!(!overlay.mark_failed(first.session, "late failure"));
        assert_eq!(
            overlay.session().map(|s| &s.load),
            Some(&MediaLoadState::Pending)
        );
        assert!(overlay.mark_failed(second.session, "404"));
    }

    #[test]
    fn reload_restarts_the_shown_reference() {
        let mut overlay = VideoOverlay::default();
        assert_eq!(overlay.reload(), None);

        let first = overlay.open(URL);
        overlay.mark_failed(first.session, "timeout");
        let again = overlay.reload().expect("overlay is open");
        assert_eq!(again.url, URL);
        assert!(again.session > first.session);
        assert!(!overlay.load_failed());
        assert!(!overlay.mark_loaded(first.session));
    }
}

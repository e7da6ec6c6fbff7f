//! Top-level screen selection. No history stack, no URL sync.

use pharmacy_types::view::ViewState;

/// What a "go to upload" request ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadNavigation {
    /// The upload section was already on screen; it gets scrolled to.
    ScrolledIntoView,
    /// The router switched to the dedicated upload screen.
    Switched,
}

#[derive(Debug, Clone, Default)]
pub struct Router {
    current: ViewState,
    scroll_request: bool,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> ViewState {
        self.current
    }

    /// Every screen is reachable from every other screen.
    pub fn navigate(&mut self, target: ViewState) {
        if self.current != target {
            log::debug!("Navigate: {:?} -> {:?}", self.current, target);
        }
        self.current = target;
        self.scroll_request = false;
    }

    /// Bring the upload form into view. `section_present` is whether the
    /// in-page upload section is currently rendered.
    pub fn request_upload(&mut self, section_present: bool) -> UploadNavigation {
        if section_present {
            self.scroll_request = true;
            UploadNavigation::ScrolledIntoView
        } else {
            self.navigate(ViewState::Upload);
            UploadNavigation::Switched
        }
    }

    /// Consume a pending scroll request. Returns true at most once per request.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_request)
    }
}

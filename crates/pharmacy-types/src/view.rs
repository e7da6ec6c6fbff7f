use serde::{Deserialize, Serialize};

/// Top-level screen selection. Exactly one is live at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewState {
    Home,
    Shop,
    Upload,
    CartPage,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::Home
    }
}

impl ViewState {
    pub fn all() -> &'static [ViewState] {
        &[
            ViewState::Home,
            ViewState::Shop,
            ViewState::Upload,
            ViewState::CartPage,
        ]
    }

    pub fn label(&self) -> &str {
        match self {
            ViewState::Home => "Home",
            ViewState::Shop => "Shop",
            ViewState::Upload => "Upload Prescription",
            ViewState::CartPage => "Cart",
        }
    }

    /// Whether this screen embeds the in-page upload section.
    pub fn hosts_upload_section(&self) -> bool {
        matches!(self, ViewState::Home)
    }
}

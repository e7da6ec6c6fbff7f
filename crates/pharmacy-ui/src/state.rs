//! UI-level state that drives rendering.
//! Updated each frame by draining the EventBus; everything else the
//! screens show is read straight from the cart, router and controllers.

use pharmacy_types::event::AppEvent;
use pharmacy_types::upload::UploadStatus;

pub const STATUS_ONLINE: &str = "Easy Health Care • Online";
pub const STATUS_TYPING: &str = "Pharmacist is typing...";

pub struct UiState {
    /// Chat header subtitle
    pub chat_status: String,
    /// Replies requested but not yet resolved
    pub replies_in_flight: usize,
    /// Latest upload status seen on the bus
    pub upload_status: UploadStatus,
    /// Problem with the last picked file, shown under the upload form
    pub upload_notice: Option<String>,
    /// Whether the in-page upload section was drawn this frame
    pub upload_section_rendered: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            chat_status: STATUS_ONLINE.to_string(),
            replies_in_flight: 0,
            upload_status: UploadStatus::Idle,
            upload_notice: None,
            upload_section_rendered: false,
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<AppEvent>) {
        for event in events {
            match event {
                AppEvent::ChatReplyPending { .. } => {
                    self.replies_in_flight += 1;
                }
                AppEvent::ChatReplyAppended { .. } | AppEvent::ChatReplyAbandoned { .. } => {
                    self.replies_in_flight = self.replies_in_flight.saturating_sub(1);
                }
                AppEvent::UploadStatusChanged { status } => {
                    if status == UploadStatus::Uploading {
                        self.upload_notice = None;
                    }
                    self.upload_status = status;
                }
            }
        }
        self.chat_status = if self.replies_in_flight > 0 {
            STATUS_TYPING.to_string()
        } else {
            STATUS_ONLINE.to_string()
        };
    }

    pub fn set_upload_notice(&mut self, message: impl Into<String>) {
        self.upload_notice = Some(message.into());
    }

    /// Called at the start of every frame, before any screen is drawn.
    pub fn begin_frame(&mut self) {
        self.upload_section_rendered = false;
    }

    pub fn is_busy(&self) -> bool {
        self.replies_in_flight > 0 || self.upload_status != UploadStatus::Idle
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

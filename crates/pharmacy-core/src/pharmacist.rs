//! Pharmacist chat transport: the one place that talks to the hosted model.
//!
//! Holds a single conversation for the life of the app. Every failure is
//! turned into a fixed fallback reply; callers never see an error.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pharmacy_types::config::ChatConfig;

use crate::ports::{ConversationPort, GenerativePort};

/// Reply when no conversation could be opened (e.g. no credential).
pub const FALLBACK_UNAVAILABLE: &str =
    "I'm having trouble connecting to the pharmacist network right now. Please try again later.";

/// Reply when the model answered without any text.
pub const FALLBACK_NO_ANSWER: &str =
    "I understood, but I don't have a specific answer for that. Could you rephrase?";

/// Reply when the request itself failed.
pub const FALLBACK_ERROR: &str =
    "I apologize, but I'm having trouble processing your request right now. Please try again.";

pub struct PharmacistService {
    config: ChatConfig,
    backend: Rc<dyn GenerativePort>,
    session: RefCell<Option<Rc<dyn ConversationPort>>>,
    warned_missing_key: Cell<bool>,
}

impl PharmacistService {
    pub fn new(config: ChatConfig, backend: Rc<dyn GenerativePort>) -> Self {
        Self {
            config,
            backend,
            session: RefCell::new(None),
            warned_missing_key: Cell::new(false),
        }
    }

    pub fn has_session(&self) -> bool {
        self.session.borrow().is_some()
    }

    /// Open the conversation if it is not open yet. Returns `None` when the
    /// service is running in fallback-only mode.
    pub fn ensure_session(&self) -> Option<Rc<dyn ConversationPort>> {
        if let Some(session) = self.session.borrow().as_ref() {
            return Some(session.clone());
        }

        if !self.config.has_api_key() {
            if !self.warned_missing_key.replace(true) {
                log::warn!("Gemini API key is missing; pharmacist chat will use fallback replies");
            }
            return None;
        }

        match self.backend.create_session(&self.config.system_instruction) {
            Ok(session) => {
                log::info!(
                    "Pharmacist chat session started ({}, {})",
                    self.backend.provider_name(),
                    self.config.model
                );
                *self.session.borrow_mut() = Some(session.clone());
                Some(session)
            }
            Err(e) => {
                log::error!("Failed to start chat session: {}", e);
                None
            }
        }
    }

    /// Send one message and return the text to show in the chat log.
    pub async fn send(&self, text: &str) -> String {
        let Some(session) = self.ensure_session() else {
            return FALLBACK_UNAVAILABLE.to_string();
        };

        match session.send_message(text).await {
            Ok(Some(reply)) => reply,
            Ok(None) => FALLBACK_NO_ANSWER.to_string(),
            Err(e) => {
                log::error!("Error sending message to pharmacist model: {}", e);
                FALLBACK_ERROR.to_string()
            }
        }
    }
}

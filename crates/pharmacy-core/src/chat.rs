//! Chat widget state and the controller that feeds it.
//!
//! Appending is two-phase: [`ChatWidget::begin_reply`] puts the user message
//! in the log immediately and hands back a [`PendingReply`] ticket, and
//! [`ChatWidget::complete_reply`] appends the assistant answer once it lands.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use pharmacy_types::{
    event::AppEvent,
    message::{ChatMessage, MessageId},
};

use crate::cancel::CancellationToken;
use crate::event_bus::EventBus;
use crate::pharmacist::PharmacistService;

/// Ticket for a reply that has been requested but not yet appended.
#[derive(Debug)]
pub struct PendingReply {
    user_message: MessageId,
    text: String,
    sent_at: DateTime<Utc>,
}

impl PendingReply {
    pub fn user_message(&self) -> MessageId {
        self.user_message
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

pub struct ChatWidget {
    open: bool,
    messages: Vec<ChatMessage>,
    outstanding: usize,
    draft: String,
    next_id: u64,
}

impl ChatWidget {
    pub fn new() -> Self {
        Self {
            open: false,
            messages: vec![ChatMessage::greeting()],
            outstanding: 0,
            draft: String::new(),
            next_id: 1,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut String {
        &mut self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn take_draft(&mut self) -> String {
        std::mem::take(&mut self.draft)
    }

    /// True while at least one reply is outstanding.
    pub fn is_pending(&self) -> bool {
        self.outstanding > 0
    }

    /// Append the user's message now. Whitespace-only text is ignored.
    pub fn begin_reply(&mut self, text: &str) -> Option<PendingReply> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let id = self.alloc_id();
        let message = ChatMessage::user(id, text);
        let sent_at = message.timestamp;
        self.messages.push(message);
        self.outstanding += 1;
        Some(PendingReply {
            user_message: id,
            text: text.to_string(),
            sent_at,
        })
    }

    /// Append the assistant's answer for `pending`.
    pub fn complete_reply(&mut self, pending: PendingReply, text: impl Into<String>) -> MessageId {
        let id = self.alloc_id();
        let mut message = ChatMessage::assistant(id, text);
        // wall clock may step backwards; replies never predate their question
        if message.timestamp < pending.sent_at {
            message.timestamp = pending.sent_at;
        }
        self.messages.push(message);
        self.settle();
        id
    }

    /// Forget `pending` without appending anything.
    pub fn abandon_reply(&mut self, pending: PendingReply) {
        log::debug!("Dropping reply for {}", pending.user_message);
        self.settle();
    }

    fn settle(&mut self) {
        self.outstanding = self.outstanding.saturating_sub(1);
    }

    fn alloc_id(&mut self) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl Default for ChatWidget {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing to send
    Ignored,
    /// The assistant message with this id was appended
    Replied(MessageId),
    /// The widget was unmounted before the reply arrived
    Abandoned,
}

/// Drives a [`ChatWidget`] against the pharmacist service.
pub struct ChatController {
    widget: Rc<RefCell<ChatWidget>>,
    service: Rc<PharmacistService>,
    events: EventBus,
    token: CancellationToken,
}

impl ChatController {
    /// Mount the widget. The chat session is opened eagerly.
    pub fn new(service: Rc<PharmacistService>, events: EventBus) -> Self {
        service.ensure_session();
        Self {
            widget: Rc::new(RefCell::new(ChatWidget::new())),
            service,
            events,
            token: CancellationToken::new(),
        }
    }

    pub fn widget(&self) -> Rc<RefCell<ChatWidget>> {
        self.widget.clone()
    }

    pub fn service(&self) -> &PharmacistService {
        &self.service
    }

    /// Append `text` as the user's message and wait for the reply. The draft
    /// buffer is not touched; see [`ChatController::submit_draft`].
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        let pending = self.widget.borrow_mut().begin_reply(text);
        let Some(pending) = pending else {
            return SubmitOutcome::Ignored;
        };

        let message_id = pending.user_message();
        self.events.emit(AppEvent::ChatReplyPending { message_id });

        let text = pending.text().to_string();
        match self.token.run(self.service.send(&text)).await {
            Ok(reply) => {
                let reply_id = self.widget.borrow_mut().complete_reply(pending, reply);
                self.events.emit(AppEvent::ChatReplyAppended { message_id });
                SubmitOutcome::Replied(reply_id)
            }
            Err(_) => {
                self.widget.borrow_mut().abandon_reply(pending);
                self.events.emit(AppEvent::ChatReplyAbandoned { message_id });
                SubmitOutcome::Abandoned
            }
        }
    }

    /// Submit the draft buffer, emptying it. A blank draft is left alone.
    pub async fn submit_draft(&self) -> SubmitOutcome {
        let draft = {
            let mut widget = self.widget.borrow_mut();
            if widget.draft().trim().is_empty() {
                return SubmitOutcome::Ignored;
            }
            widget.take_draft()
        };
        self.submit(&draft).await
    }

    /// Tear the widget down; replies still in flight are dropped.
    pub fn unmount(&self) {
        self.token.cancel();
    }
}

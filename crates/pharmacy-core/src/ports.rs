//! Port traits — the hexagonal architecture boundary.
//!
//! These traits are defined here in `pharmacy-core` (pure Rust).
//! Implementations live in `pharmacy-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use std::rc::Rc;
use async_trait::async_trait;
use pharmacy_types::{Result, upload::PreviewRef};

// ─── Generative AI Port ──────────────────────────────────────

/// Factory for conversations with the hosted model.
pub trait GenerativePort {
    /// Open a conversation that carries `system_instruction` on every turn.
    fn create_session(&self, system_instruction: &str) -> Result<Rc<dyn ConversationPort>>;

    /// Provider name (for logging/debug)
    fn provider_name(&self) -> &str;
}

/// A stateful conversation. Prior turns are held by the implementation.
#[async_trait(?Send)]
pub trait ConversationPort {
    /// Send one user message. `Ok(None)` means the model produced no usable
    /// text; implementations map blank replies to `None`.
    async fn send_message(&self, text: &str) -> Result<Option<String>>;
}

// ─── Timer Port ──────────────────────────────────────────────

#[async_trait(?Send)]
pub trait TimerPort {
    /// Resolve after `ms` milliseconds without blocking the event loop.
    async fn sleep(&self, ms: u64);
}

// ─── Preview Port ────────────────────────────────────────────

pub trait PreviewPort {
    /// Release a preview once its file has left the upload slot.
    fn release(&self, preview: &PreviewRef);
}

/// Preview port for previews that hold no resources.
pub struct NoopPreviews;

impl PreviewPort for NoopPreviews {
    fn release(&self, _preview: &PreviewRef) {}
}

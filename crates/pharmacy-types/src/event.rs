use serde::{Deserialize, Serialize};

use crate::message::MessageId;
use crate::upload::UploadStatus;

/// Events emitted by background tasks.
/// The UI drains these each frame for status text and repaints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppEvent {
    /// A user message was appended and a reply was requested
    ChatReplyPending { message_id: MessageId },

    /// The assistant reply for a message landed in the log
    ChatReplyAppended { message_id: MessageId },

    /// A reply was dropped because its request was cancelled
    ChatReplyAbandoned { message_id: MessageId },

    /// The prescription upload moved to a new status
    UploadStatusChanged { status: UploadStatus },
}

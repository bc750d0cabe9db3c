//! Message log — append-only chat entries in arrival order.
//!
//! Messages render in the exact order appended: arrival order, storage
//! order, and display order are the same sequence. Timestamps are captured
//! for display only and never used to reorder.

use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::ErrorCode;
use crate::model::ChatMessage;
use crate::session::Session;
use crate::state::Mirror;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message is empty")]
    Empty,
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl ErrorCode for ChatError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "E_EMPTY_MESSAGE",
            Self::Storage(_) => "E_STORAGE",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Storage(e) => e.retryable(),
            Self::Empty => false,
        }
    }
}

/// Append a chat message from the session's account.
///
/// The text is trimmed before storage; the sender's id and current username
/// are snapshotted into the message along with a capture-time timestamp.
///
/// # Errors
///
/// Returns `Empty` if the text is empty or whitespace-only after trimming;
/// the collection is unchanged. Returns `Storage` if the durable write
/// failed; the message is still present in memory and
/// [`Mirror::flush_messages`] retries the write.
pub fn send_message(mirror: &mut Mirror, session: &Session, text: &str) -> Result<ChatMessage, ChatError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ChatError::Empty);
    }

    let message = ChatMessage {
        id: Uuid::new_v4(),
        user_id: session.user_id(),
        username: session.username().to_owned(),
        text: trimmed.to_owned(),
        timestamp: OffsetDateTime::now_utc(),
    };

    let created = message.clone();
    mirror.push_message(message)?;
    Ok(created)
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

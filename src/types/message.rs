use serde::{Deserialize, Serialize};

use crate::utils::time::display_time;

/// Who wrote a message.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The person typing into the client.
    User,

    /// The loan assistant on the server.
    Bot,
}

/// One entry of the chat transcript.
///
/// Messages are created once and never modified; the transcript only grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The text of the message.
    pub content: String,

    /// Who sent it.
    pub sender: Sender,

    /// Local wall-clock time of creation, formatted for display.
    pub timestamp: String,
}

impl Message {
    /// Creates a message stamped with the current local time.
    pub fn new(content: impl Into<String>, sender: Sender) -> Self {
        Self {
            content: content.into(),
            sender,
            timestamp: display_time(),
        }
    }

    /// Creates a message from the user.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(content, Sender::User)
    }

    /// Creates a message from the assistant.
    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(content, Sender::Bot)
    }
}

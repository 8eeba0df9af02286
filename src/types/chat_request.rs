use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's message, already trimmed.
    pub message: String,

    /// Correlates this turn with the server-side conversation.
    pub session_id: String,
}

impl ChatRequest {
    /// Creates a new chat request.
    pub fn new(message: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            session_id: session_id.into(),
        }
    }
}

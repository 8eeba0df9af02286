use serde::{Deserialize, Serialize};

use crate::types::LoanStatus;

/// Body returned by `POST /api/chat`.
///
/// Each reply fully determines the panels the client shows next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    /// The assistant's message.
    pub response: String,

    /// Whether the assistant expects a specific kind of input.
    #[serde(default)]
    pub requires_input: bool,

    /// The kind of input expected, e.g. `"number"` or `"phone"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,

    /// The stage of the application.
    pub status: LoanStatus,

    /// The server echoes the session id back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl ChatReply {
    /// Creates a reply that asks for nothing in particular.
    pub fn new(response: impl Into<String>, status: LoanStatus) -> Self {
        Self {
            response: response.into(),
            requires_input: false,
            input_type: None,
            status,
            session_id: None,
        }
    }

    /// Marks the reply as requiring input of the given kind.
    pub fn with_input(mut self, input_type: impl Into<String>) -> Self {
        self.requires_input = true;
        self.input_type = Some(input_type.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_server_reply() {
        let json = r#"{
            "response": "Please enter your loan amount",
            "session_id": "session_abc_1",
            "status": "sales",
            "requires_input": true,
            "input_type": "number"
        }"#;
        let reply: ChatReply = serde_json::from_str(json).unwrap();
        assert_eq!(reply.response, "Please enter your loan amount");
        assert!(reply.requires_input);
        assert_eq!(reply.input_type.as_deref(), Some("number"));
        assert_eq!(reply.status, LoanStatus::Sales);
        assert_eq!(reply.session_id.as_deref(), Some("session_abc_1"));
    }

    #[test]
    fn optional_fields_default() {
        let json = r#"{"response": "Hi", "status": "initial", "input_type": null}"#;
        let reply: ChatReply = serde_json::from_str(json).unwrap();
        assert!(!reply.requires_input);
        assert!(reply.input_type.is_none());
        assert!(reply.session_id.is_none());
    }

    #[test]
    fn missing_response_is_an_error() {
        let json = r#"{"error": "boom"}"#;
        assert!(serde_json::from_str::<ChatReply>(json).is_err());
    }
}

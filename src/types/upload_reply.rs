use serde::{Deserialize, Serialize};

/// Body optionally returned by `POST /api/upload` on success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReply {
    /// Confirmation text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// The name the server stored the file under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// Body optionally returned by any endpoint on failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReply {
    /// Message to show the user verbatim.
    #[serde(default)]
    pub error: Option<String>,
}

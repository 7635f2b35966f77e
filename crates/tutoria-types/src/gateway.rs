//! Wire types and errors for the backend chat endpoint.
//!
//! These types model the single JSON round trip to the chat backend:
//! the per-request envelope, the success reply, and the failure body.
//! Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::chat::ChatMessage;

/// Everything sent to the backend for one turn.
///
/// Ephemeral: rebuilt per request from the current session state and never
/// persisted. `chat_history` is already bounded by the context budgeter and
/// does not include the message being submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    pub system_prompt: String,
    pub article_context: String,
    pub chat_history: Vec<ChatMessage>,
    pub user_message: String,
}

/// Success body from the chat endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub answer: String,
}

/// Failure body from the chat endpoint.
///
/// The backend reports errors as a descriptor with a displayable message;
/// both `{"error": {"message": ...}}` and a flat `{"message": ...}` are
/// accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendErrorBody {
    #[serde(default)]
    pub error: Option<BackendErrorDetail>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Nested error detail inside a [`BackendErrorBody`].
#[derive(Debug, Clone, Deserialize)]
pub struct BackendErrorDetail {
    pub message: String,
}

impl BackendErrorBody {
    /// The displayable message, preferring the nested detail.
    pub fn display_message(&self) -> Option<&str> {
        self.error
            .as_ref()
            .map(|e| e.message.as_str())
            .or(self.message.as_deref())
    }
}

/// Errors from the chat gateway round trip.
///
/// Every variant carries or renders a human-readable message suitable for
/// inline display. The gateway performs no retries; failures propagate
/// directly to the session controller.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("could not reach the chat backend: {0}")]
    Network(String),

    #[error("chat backend returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("chat backend returned an empty reply")]
    EmptyReply,

    #[error("could not read the chat backend reply: {0}")]
    Malformed(String),

    #[error("the chat backend took too long to respond")]
    Timeout,

    #[error("request cancelled")]
    Cancelled,
}

use thiserror::Error;

use crate::gateway::GatewayError;

/// Errors from transcript store operations (used by trait definitions in
/// tutoria-core).
///
/// Malformed stored payloads are NOT an error: stores recover by treating
/// them as absent, so this enum only covers real storage failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage connection error")]
    Connection,

    #[error("storage query error: {0}")]
    Query(String),

    #[error("failed to serialize transcript: {0}")]
    Serialization(String),
}

/// Errors surfaced by the session controller.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A submit arrived while a request was already in flight. The new
    /// submit is rejected, never queued.
    #[error("a request is already in flight for this session")]
    RequestInFlight,

    /// The submitted text was empty and the intent supplies no synthetic
    /// instruction, so there is nothing to send.
    #[error("nothing to send: message is empty")]
    EmptyMessage,

    /// The gateway round trip failed; the optimistic user message has been
    /// retracted and the session is interactive again.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

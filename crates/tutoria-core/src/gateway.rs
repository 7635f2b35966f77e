//! ChatGateway trait definition.
//!
//! The sole point of contact with the remote chat backend. Implementations
//! live in tutoria-infra (e.g., `HttpChatGateway`).

use tokio_util::sync::CancellationToken;

use tutoria_types::gateway::{GatewayError, RequestEnvelope};

/// Port for the backend chat endpoint round trip.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). A gateway
/// translates one envelope into one network call and normalizes the
/// outcome; it never mutates session state and performs no retries --
/// retry policy belongs to the caller.
///
/// `cancel` is the current turn's cancellation token. When it fires the
/// implementation should abandon the round trip and return
/// [`GatewayError::Cancelled`] promptly instead of letting the transport
/// run to completion.
pub trait ChatGateway: Send + Sync {
    /// Send one request and resolve to the assistant's reply text.
    fn send(
        &self,
        envelope: &RequestEnvelope,
        cancel: &CancellationToken,
    ) -> impl std::future::Future<Output = Result<String, GatewayError>> + Send;
}

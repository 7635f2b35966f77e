//! TranscriptStore trait definition.
//!
//! The persistence port for per-topic transcripts. Implementations live in
//! tutoria-infra (e.g., `SqliteTranscriptStore`) and in
//! [`super::memory::InMemoryTranscriptStore`].

use tutoria_types::chat::ChatMessage;
use tutoria_types::error::StoreError;

/// Persistence port for per-topic tutoring transcripts.
///
/// Keys are topic ids; values are ordered message lists. Every mutating
/// call is write-through to durable storage. Uses native async fn in traits
/// (RPITIT, Rust 2024 edition).
///
/// Implementations must treat malformed stored payloads as absent: `load`
/// returns an empty list rather than a parse error so a corrupt record can
/// never break a session.
pub trait TranscriptStore: Send + Sync {
    /// Load a topic's transcript in order. Empty if none is stored or the
    /// stored payload is unreadable.
    fn load(
        &self,
        topic_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, StoreError>> + Send;

    /// Append a message to the end of a topic's transcript and return the
    /// updated list.
    fn append(
        &self,
        topic_id: &str,
        message: &ChatMessage,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, StoreError>> + Send;

    /// Rewrite a topic's stored transcript to match in-memory state.
    ///
    /// Used after a successful exchange to reconcile any divergence a prior
    /// rollback left behind.
    fn replace_all(
        &self,
        topic_id: &str,
        messages: &[ChatMessage],
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Remove a topic's transcript and its persisted record. Idempotent.
    fn clear(
        &self,
        topic_id: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// List topic ids that currently have a stored transcript.
    fn list_topics(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<String>, StoreError>> + Send;
}

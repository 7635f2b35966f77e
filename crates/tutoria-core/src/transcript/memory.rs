//! In-memory transcript store.
//!
//! Implements [`TranscriptStore`] over a mutex-guarded map. Used as the
//! test double for the session controller and as a storage backend for
//! hosts that do not want durable persistence.

use std::collections::HashMap;
use std::sync::Mutex;

use tutoria_types::chat::ChatMessage;
use tutoria_types::error::StoreError;

use super::store::TranscriptStore;

/// Mutex-guarded, map-backed implementation of [`TranscriptStore`].
#[derive(Default)]
pub struct InMemoryTranscriptStore {
    topics: Mutex<HashMap<String, Vec<ChatMessage>>>,
}

impl InMemoryTranscriptStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TranscriptStore for InMemoryTranscriptStore {
    async fn load(&self, topic_id: &str) -> Result<Vec<ChatMessage>, StoreError> {
        let topics = self.topics.lock().expect("transcript map lock poisoned");
        Ok(topics.get(topic_id).cloned().unwrap_or_default())
    }

    async fn append(
        &self,
        topic_id: &str,
        message: &ChatMessage,
    ) -> Result<Vec<ChatMessage>, StoreError> {
        let mut topics = self.topics.lock().expect("transcript map lock poisoned");
        let transcript = topics.entry(topic_id.to_string()).or_default();
        transcript.push(message.clone());
        Ok(transcript.clone())
    }

    async fn replace_all(
        &self,
        topic_id: &str,
        messages: &[ChatMessage],
    ) -> Result<(), StoreError> {
        let mut topics = self.topics.lock().expect("transcript map lock poisoned");
        topics.insert(topic_id.to_string(), messages.to_vec());
        Ok(())
    }

    async fn clear(&self, topic_id: &str) -> Result<(), StoreError> {
        let mut topics = self.topics.lock().expect("transcript map lock poisoned");
        topics.remove(topic_id);
        Ok(())
    }

    async fn list_topics(&self) -> Result<Vec<String>, StoreError> {
        let topics = self.topics.lock().expect("transcript map lock poisoned");
        let mut ids: Vec<String> = topics.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_empty_topic() {
        let store = InMemoryTranscriptStore::new();
        let messages = store.load("fresh").await.unwrap();
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn test_append_roundtrip_preserves_order() {
        let store = InMemoryTranscriptStore::new();
        let sequence = [
            ChatMessage::user("one"),
            ChatMessage::assistant("two"),
            ChatMessage::user("three"),
        ];
        for msg in &sequence {
            store.append("topic-a", msg).await.unwrap();
        }

        let loaded = store.load("topic-a").await.unwrap();
        assert_eq!(loaded, sequence);
    }

    #[tokio::test]
    async fn test_append_returns_updated_list() {
        let store = InMemoryTranscriptStore::new();
        let updated = store
            .append("topic-a", &ChatMessage::user("hi"))
            .await
            .unwrap();
        assert_eq!(updated.len(), 1);

        let updated = store
            .append("topic-a", &ChatMessage::assistant("hello"))
            .await
            .unwrap();
        assert_eq!(updated.len(), 2);
    }

    #[tokio::test]
    async fn test_replace_all_rewrites() {
        let store = InMemoryTranscriptStore::new();
        store
            .append("topic-a", &ChatMessage::user("stale"))
            .await
            .unwrap();

        let fresh = vec![ChatMessage::user("a"), ChatMessage::assistant("b")];
        store.replace_all("topic-a", &fresh).await.unwrap();

        assert_eq!(store.load("topic-a").await.unwrap(), fresh);
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let store = InMemoryTranscriptStore::new();
        store
            .append("topic-a", &ChatMessage::user("hi"))
            .await
            .unwrap();

        store.clear("topic-a").await.unwrap();
        let after_once = store.load("topic-a").await.unwrap();

        store.clear("topic-a").await.unwrap();
        let after_twice = store.load("topic-a").await.unwrap();

        assert!(after_once.is_empty());
        assert_eq!(after_once, after_twice);
    }

    #[tokio::test]
    async fn test_topics_are_isolated() {
        let store = InMemoryTranscriptStore::new();
        store
            .append("topic-a", &ChatMessage::user("a"))
            .await
            .unwrap();
        store
            .append("topic-b", &ChatMessage::user("b"))
            .await
            .unwrap();

        store.clear("topic-a").await.unwrap();
        assert!(store.load("topic-a").await.unwrap().is_empty());
        assert_eq!(store.load("topic-b").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_topics_sorted() {
        let store = InMemoryTranscriptStore::new();
        store.append("beta", &ChatMessage::user("b")).await.unwrap();
        store
            .append("alpha", &ChatMessage::user("a"))
            .await
            .unwrap();

        let topics = store.list_topics().await.unwrap();
        assert_eq!(topics, vec!["alpha", "beta"]);
    }
}

//! SQLite transcript store implementation.
//!
//! Implements `TranscriptStore` from `tutoria-core` using sqlx with split
//! read/write pools. Each topic owns one row; the ordered message list is
//! serialized as a JSON array of `{role, content}` objects and rewritten as
//! a whole on every mutation. A row whose payload no longer parses is
//! treated as absent, never as an error.

use chrono::Utc;
use sqlx::Row;
use tracing::warn;

use tutoria_core::transcript::store::TranscriptStore;
use tutoria_types::chat::ChatMessage;
use tutoria_types::error::StoreError;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `TranscriptStore`.
pub struct SqliteTranscriptStore {
    pool: DatabasePool,
}

impl SqliteTranscriptStore {
    /// Create a new store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Upsert the full message list for a topic.
    async fn write(&self, topic_id: &str, messages: &[ChatMessage]) -> Result<(), StoreError> {
        let payload = serde_json::to_string(messages)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO topic_transcripts (topic_id, messages, created_at, updated_at)
               VALUES (?, ?, ?, ?)
               ON CONFLICT (topic_id) DO UPDATE SET messages = excluded.messages, updated_at = excluded.updated_at"#,
        )
        .bind(topic_id)
        .bind(&payload)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(())
    }
}

impl TranscriptStore for SqliteTranscriptStore {
    async fn load(&self, topic_id: &str) -> Result<Vec<ChatMessage>, StoreError> {
        let row = sqlx::query("SELECT messages FROM topic_transcripts WHERE topic_id = ?")
            .bind(topic_id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let Some(row) = row else {
            return Ok(Vec::new());
        };

        let payload: String = row
            .try_get("messages")
            .map_err(|e| StoreError::Query(e.to_string()))?;

        // First visit after corruption behaves like a first visit ever.
        match serde_json::from_str::<Vec<ChatMessage>>(&payload) {
            Ok(messages) => Ok(messages),
            Err(err) => {
                warn!(topic_id, "stored transcript is unreadable, treating as empty: {err}");
                Ok(Vec::new())
            }
        }
    }

    async fn append(
        &self,
        topic_id: &str,
        message: &ChatMessage,
    ) -> Result<Vec<ChatMessage>, StoreError> {
        let mut messages = self.load(topic_id).await?;
        messages.push(message.clone());
        self.write(topic_id, &messages).await?;
        Ok(messages)
    }

    async fn replace_all(
        &self,
        topic_id: &str,
        messages: &[ChatMessage],
    ) -> Result<(), StoreError> {
        self.write(topic_id, messages).await
    }

    async fn clear(&self, topic_id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM topic_transcripts WHERE topic_id = ?")
            .bind(topic_id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(())
    }

    async fn list_topics(&self) -> Result<Vec<String>, StoreError> {
        let rows = sqlx::query("SELECT topic_id FROM topic_transcripts ORDER BY topic_id")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let mut topics = Vec::with_capacity(rows.len());
        for row in &rows {
            let topic_id: String = row
                .try_get("topic_id")
                .map_err(|e| StoreError::Query(e.to_string()))?;
            topics.push(topic_id);
        }

        Ok(topics)
    }
}

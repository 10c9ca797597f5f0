//! Message storage and result persistence boundaries
//!
//! The analysis pipeline only reads conversations through [`MessageStore`]
//! and only writes results through [`AnalysisSink`]. PostgreSQL implements
//! both in [`crate::database`]; [`InMemoryMessageStore`] backs tests and
//! one-off runs over imported files.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};

use crate::models::{Conversation, KeywordRecord, Message, RelationRecord};
use crate::Result;

/// Read access to stored conversations
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// The conversation of `user_id` if it has any message at or after `since`.
    /// Returned messages are in storage order and not filtered by time.
    async fn find_conversation(
        &self,
        user_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Option<Conversation>>;

    /// Up to `limit` messages from any user whose text contains `needle`,
    /// ignoring case, in storage order
    async fn search_messages(&self, needle: &str, limit: usize) -> Result<Vec<Message>>;
}

/// Append-only destination for analysis results
#[async_trait]
pub trait AnalysisSink: Send + Sync {
    async fn save_keywords(&self, records: &[KeywordRecord]) -> Result<()>;

    async fn save_relations(&self, records: &[RelationRecord]) -> Result<()>;
}

/// Conversations held in memory
#[derive(Debug, Default)]
pub struct InMemoryMessageStore {
    conversations: RwLock<Vec<Conversation>>,
    keywords: Mutex<Vec<KeywordRecord>>,
    relations: Mutex<Vec<RelationRecord>>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_conversations(conversations: Vec<Conversation>) -> Self {
        Self {
            conversations: RwLock::new(conversations),
            ..Self::default()
        }
    }

    /// Add a conversation, appending to an existing one for the same user
    pub async fn insert_conversation(&self, conversation: Conversation) {
        let mut conversations = self.conversations.write().await;
        match conversations
            .iter_mut()
            .find(|c| c.user_id == conversation.user_id)
        {
            Some(existing) => existing.messages.extend(conversation.messages),
            None => conversations.push(conversation),
        }
    }

    pub async fn push_message(&self, user_id: &str, message: Message) {
        self.insert_conversation(Conversation::new(user_id, vec![message]))
            .await;
    }

    pub async fn message_count(&self) -> usize {
        self.conversations
            .read()
            .await
            .iter()
            .map(|c| c.messages.len())
            .sum()
    }

    pub async fn saved_keywords(&self) -> Vec<KeywordRecord> {
        self.keywords.lock().await.clone()
    }

    pub async fn saved_relations(&self) -> Vec<RelationRecord> {
        self.relations.lock().await.clone()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn find_conversation(
        &self,
        user_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Option<Conversation>> {
        let conversations = self.conversations.read().await;
        Ok(conversations
            .iter()
            .find(|c| c.user_id == user_id && c.has_activity_since(since))
            .cloned())
    }

    async fn search_messages(&self, needle: &str, limit: usize) -> Result<Vec<Message>> {
        let needle = needle.to_lowercase();
        let conversations = self.conversations.read().await;
        Ok(conversations
            .iter()
            .flat_map(|c| c.messages.iter())
            .filter(|m| m.text.to_lowercase().contains(&needle))
            .take(limit)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AnalysisSink for InMemoryMessageStore {
    async fn save_keywords(&self, records: &[KeywordRecord]) -> Result<()> {
        self.keywords.lock().await.extend_from_slice(records);
        Ok(())
    }

    async fn save_relations(&self, records: &[RelationRecord]) -> Result<()> {
        self.relations.lock().await.extend_from_slice(records);
        Ok(())
    }
}

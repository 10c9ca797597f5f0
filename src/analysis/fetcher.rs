use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::models::{AuthorKind, Conversation, UserMessage};
use crate::store::MessageStore;

/// Pulls the recent user-authored messages of one conversation
#[derive(Clone)]
pub struct MessageFetcher {
    store: Arc<dyn MessageStore>,
}

impl MessageFetcher {
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }

    /// Messages authored by the user within the last `days_back` days, at
    /// most `limit`, in storage order. Storage failures yield an empty list.
    pub async fn fetch(&self, user_id: &str, limit: usize, days_back: i64) -> Vec<UserMessage> {
        self.fetch_at(user_id, limit, days_back, Utc::now()).await
    }

    /// [`fetch`](Self::fetch) with an explicit clock
    pub async fn fetch_at(
        &self,
        user_id: &str,
        limit: usize,
        days_back: i64,
        now: DateTime<Utc>,
    ) -> Vec<UserMessage> {
        let since = window_start(now, days_back);

        match self.store.find_conversation(user_id, since).await {
            Ok(Some(conversation)) => {
                let messages = select_user_messages(&conversation, since, limit);
                debug!(
                    "Fetched {} user messages for {} since {}",
                    messages.len(),
                    user_id,
                    since
                );
                messages
            }
            Ok(None) => {
                debug!("No recent conversation for {}", user_id);
                Vec::new()
            }
            Err(e) => {
                warn!("Failed to fetch conversation for {}: {}", user_id, e);
                Vec::new()
            }
        }
    }
}

/// Oldest timestamp included in a `days_back` window ending at `now`
pub fn window_start(now: DateTime<Utc>, days_back: i64) -> DateTime<Utc> {
    Duration::try_days(days_back)
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// User-authored messages at or after `since`, capped at `limit`
pub fn select_user_messages(
    conversation: &Conversation,
    since: DateTime<Utc>,
    limit: usize,
) -> Vec<UserMessage> {
    conversation
        .messages
        .iter()
        .filter(|m| m.author_kind == AuthorKind::User && m.timestamp >= since)
        .take(limit)
        .map(|m| UserMessage::new(m.text.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::models::Message;
    use crate::store::InMemoryMessageStore;
    use crate::{MindMapError, Result};

    struct FailingStore;

    #[async_trait]
    impl MessageStore for FailingStore {
        async fn find_conversation(
            &self,
            _user_id: &str,
            _since: DateTime<Utc>,
        ) -> Result<Option<Conversation>> {
            Err(MindMapError::Custom("connection refused".to_string()))
        }

        async fn search_messages(&self, _needle: &str, _limit: usize) -> Result<Vec<Message>> {
            Err(MindMapError::Custom("connection refused".to_string()))
        }
    }

    fn conversation(now: DateTime<Utc>) -> Conversation {
        Conversation::new(
            "ana",
            vec![
                Message::user("antiga", now - Duration::days(45)),
                Message::user("primeira", now - Duration::days(3)),
                Message::bot("resposta", now - Duration::days(3)),
                Message::user("segunda", now - Duration::days(2)),
                Message::user("terceira", now - Duration::days(1)),
            ],
        )
    }

    fn texts(messages: &[UserMessage]) -> Vec<&str> {
        messages.iter().map(|m| m.text.as_str()).collect()
    }

    #[test]
    fn test_select_filters_author_and_window() {
        let now = Utc::now();
        let selected = select_user_messages(&conversation(now), now - Duration::days(30), 100);
        assert_eq!(texts(&selected), vec!["primeira", "segunda", "terceira"]);
    }

    #[test]
    fn test_select_limit_keeps_storage_order() {
        let now = Utc::now();
        let selected = select_user_messages(&conversation(now), now - Duration::days(30), 2);
        assert_eq!(texts(&selected), vec!["primeira", "segunda"]);
        assert!(select_user_messages(&conversation(now), now, 0).is_empty());
    }

    #[test]
    fn test_window_start_saturates() {
        let now = Utc::now();
        assert_eq!(window_start(now, 0), now);
        assert_eq!(window_start(now, i64::MAX), DateTime::<Utc>::MIN_UTC);
    }

    #[tokio::test]
    async fn test_fetch_from_store() {
        let now = Utc::now();
        let store = Arc::new(InMemoryMessageStore::with_conversations(vec![conversation(
            now,
        )]));
        let fetcher = MessageFetcher::new(store);

        let recent = fetcher.fetch_at("ana", 10, 30, now).await;
        assert_eq!(recent.len(), 3);

        let everything = fetcher.fetch_at("ana", 10, 60, now).await;
        assert_eq!(everything[0].text, "antiga");

        assert!(fetcher.fetch_at("desconhecido", 10, 30, now).await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_swallows_store_errors() {
        let fetcher = MessageFetcher::new(Arc::new(FailingStore));
        assert!(fetcher.fetch("ana", 10, 30).await.is_empty());
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::Database;
use crate::models::{Conversation, Message, MessageRow};
use crate::store::MessageStore;
use crate::Result;

impl Database {
    /// Append one conversation turn; returns its row id
    pub async fn append_message(&self, user_id: &str, message: &Message) -> Result<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO conversation_messages (user_id, author_kind, text, sent_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            ",
        )
        .bind(user_id)
        .bind(message.author_kind.as_str())
        .bind(&message.text)
        .bind(message.timestamp)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Insert whole conversations in one transaction, keeping message order.
    /// Returns the number of messages written.
    pub async fn import_conversations(&self, conversations: &[Conversation]) -> Result<usize> {
        let mut tx = self.pool.begin().await?;
        let mut written = 0;

        for conversation in conversations {
            for message in &conversation.messages {
                sqlx::query(
                    r"
                    INSERT INTO conversation_messages (user_id, author_kind, text, sent_at)
                    VALUES ($1, $2, $3, $4)
                    ",
                )
                .bind(&conversation.user_id)
                .bind(message.author_kind.as_str())
                .bind(&message.text)
                .bind(message.timestamp)
                .execute(&mut *tx)
                .await?;
                written += 1;
            }
        }

        tx.commit().await?;
        tracing::debug!(
            "Imported {} messages from {} conversations",
            written,
            conversations.len()
        );
        Ok(written)
    }

    /// Number of stored messages, optionally for one user
    pub async fn count_messages(&self, user_id: Option<&str>) -> Result<i64> {
        let count = match user_id {
            Some(user_id) => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM conversation_messages WHERE user_id = $1",
                )
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM conversation_messages")
                    .fetch_one(&self.pool)
                    .await?
            }
        };
        Ok(count)
    }
}

#[async_trait]
impl MessageStore for Database {
    async fn find_conversation(
        &self,
        user_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Option<Conversation>> {
        let active = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS (
                SELECT 1 FROM conversation_messages
                WHERE user_id = $1 AND sent_at >= $2
            )
            ",
        )
        .bind(user_id)
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        if !active {
            return Ok(None);
        }

        let rows = sqlx::query_as::<_, MessageRow>(
            r"
            SELECT id, user_id, author_kind, text, sent_at
            FROM conversation_messages
            WHERE user_id = $1
            ORDER BY id
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let messages = rows
            .into_iter()
            .map(Message::try_from)
            .collect::<Result<Vec<Message>>>()?;

        Ok(Some(Conversation::new(user_id, messages)))
    }

    async fn search_messages(&self, needle: &str, limit: usize) -> Result<Vec<Message>> {
        let pattern = format!("%{}%", escape_like(needle));
        let rows = sqlx::query_as::<_, MessageRow>(
            r"
            SELECT id, user_id, author_kind, text, sent_at
            FROM conversation_messages
            WHERE text ILIKE $1 ESCAPE '\'
            ORDER BY id
            LIMIT $2
            ",
        )
        .bind(pattern)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Message::try_from).collect()
    }
}

/// Escape `%`, `_` and the escape character itself for a LIKE pattern
pub(crate) fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("ajuda"), "ajuda");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b\\c"), "a\\_b\\\\c");
    }
}

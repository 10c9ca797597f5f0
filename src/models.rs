use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::MindMapError;

/// Who wrote a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorKind {
    User,
    Bot,
}

impl AuthorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthorKind::User => "user",
            AuthorKind::Bot => "bot",
        }
    }
}

impl fmt::Display for AuthorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthorKind {
    type Err = MindMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(AuthorKind::User),
            "bot" => Ok(AuthorKind::Bot),
            other => Err(MindMapError::UnknownAuthorKind(other.to_string())),
        }
    }
}

/// A stored conversation turn. Read-only for the analysis core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub author_kind: AuthorKind,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(author_kind: AuthorKind, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            author_kind,
            text: text.into(),
            timestamp,
        }
    }

    pub fn user(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::new(AuthorKind::User, text, timestamp)
    }

    pub fn bot(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::new(AuthorKind::Bot, text, timestamp)
    }
}

/// Ordered messages belonging to one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub user_id: String,
    pub messages: Vec<Message>,
}

impl Conversation {
    pub fn new(user_id: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            user_id: user_id.into(),
            messages,
        }
    }

    /// True if any message is at or after `since`
    pub fn has_activity_since(&self, since: DateTime<Utc>) -> bool {
        self.messages.iter().any(|m| m.timestamp >= since)
    }
}

/// Text of one user-authored message selected for analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMessage {
    pub text: String,
}

impl UserMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Row shape of `conversation_messages`
#[derive(Debug, Clone, FromRow)]
pub struct MessageRow {
    pub id: i64,
    pub user_id: String,
    pub author_kind: String,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl TryFrom<MessageRow> for Message {
    type Error = MindMapError;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        Ok(Message {
            author_kind: row.author_kind.parse()?,
            text: row.text,
            timestamp: row.sent_at,
        })
    }
}

/// Persisted keyword produced by an analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRecord {
    pub keyword: String,
    pub created_at: DateTime<Utc>,
}

/// Persisted above-threshold keyword pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationRecord {
    pub source: String,
    pub target: String,
    pub weight: f64,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_author_kind_parse() {
        assert_eq!("user".parse::<AuthorKind>().unwrap(), AuthorKind::User);
        assert_eq!(" BOT ".parse::<AuthorKind>().unwrap(), AuthorKind::Bot);
        assert!(matches!(
            "assistant".parse::<AuthorKind>(),
            Err(MindMapError::UnknownAuthorKind(_))
        ));
    }

    #[test]
    fn test_author_kind_serde_lowercase() {
        let json = serde_json::to_string(&AuthorKind::User).unwrap();
        assert_eq!(json, "\"user\"");
        let kind: AuthorKind = serde_json::from_str("\"bot\"").unwrap();
        assert_eq!(kind, AuthorKind::Bot);
    }

    #[test]
    fn test_conversation_activity_window() {
        let now = Utc::now();
        let conversation = Conversation::new(
            "u1",
            vec![
                Message::user("old", now - Duration::days(40)),
                Message::bot("reply", now - Duration::days(39)),
            ],
        );
        assert!(!conversation.has_activity_since(now - Duration::days(30)));
        assert!(conversation.has_activity_since(now - Duration::days(45)));
    }

    #[test]
    fn test_message_row_conversion() {
        let row = MessageRow {
            id: 1,
            user_id: "u1".to_string(),
            author_kind: "user".to_string(),
            text: "olá".to_string(),
            sent_at: Utc::now(),
        };
        let message = Message::try_from(row).unwrap();
        assert_eq!(message.author_kind, AuthorKind::User);
        assert_eq!(message.text, "olá");
    }
}

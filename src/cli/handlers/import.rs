//! Conversation import handler

use std::path::Path;

use crate::cli::output::print_info;
use crate::cli::output::print_success;
use crate::database::Database;
use crate::models::Conversation;
use crate::Result;

/// Parse a JSON array of conversations
pub fn read_conversations(path: &Path) -> Result<Vec<Conversation>> {
    let content = std::fs::read_to_string(path)?;
    let conversations: Vec<Conversation> = serde_json::from_str(&content)?;
    tracing::debug!(
        "Read {} conversations from {}",
        conversations.len(),
        path.display()
    );
    Ok(conversations)
}

/// Handle import command
pub async fn handle_import_command(database: &Database, file: &Path) -> Result<()> {
    let conversations = read_conversations(file)?;
    print_info(&format!(
        "📥 Importing {} conversations from {}",
        conversations.len(),
        file.display()
    ));

    database.verify_schema_or_error().await?;
    let written = database.import_conversations(&conversations).await?;

    print_success(&format!("Imported {written} messages"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::models::AuthorKind;
    use crate::MindMapError;

    #[test]
    fn test_read_conversations() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"user_id": "ana", "messages": [
                {{"author_kind": "user", "text": "Preciso de ajuda", "timestamp": "2026-10-01T12:00:00Z"}},
                {{"author_kind": "bot", "text": "Como posso ajudar?", "timestamp": "2026-10-01T12:00:05Z"}}
            ]}}]"#
        )
        .unwrap();

        let conversations = read_conversations(file.path()).unwrap();
        assert_eq!(conversations.len(), 1);
        assert_eq!(conversations[0].user_id, "ana");
        assert_eq!(conversations[0].messages[1].author_kind, AuthorKind::Bot);
    }

    #[test]
    fn test_read_conversations_rejects_unknown_author() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"user_id": "ana", "messages": [
                {{"author_kind": "assistant", "text": "oi", "timestamp": "2026-10-01T12:00:00Z"}}
            ]}}]"#
        )
        .unwrap();

        let result = read_conversations(file.path());
        assert!(matches!(result, Err(MindMapError::Serialization(_))));
    }
}

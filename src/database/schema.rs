use super::Database;
use crate::MindMapError;
use crate::Result;

const REQUIRED_TABLES: [&str; 3] = [
    "conversation_messages",
    "mindmap_keywords",
    "mindmap_relations",
];

impl Database {
    /// Check if database schema is initialized
    /// Returns true if all required tables exist
    pub async fn is_schema_initialized(&self) -> Result<bool> {
        for table_name in REQUIRED_TABLES {
            let exists = sqlx::query_scalar::<_, bool>(
                r"
                SELECT EXISTS (
                    SELECT FROM information_schema.tables
                    WHERE table_schema = 'public'
                    AND table_name = $1
                )
                ",
            )
            .bind(table_name)
            .fetch_one(&self.pool)
            .await?;

            if !exists {
                tracing::debug!("Missing required table: {}", table_name);
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Verify database schema or return helpful error
    pub async fn verify_schema_or_error(&self) -> Result<()> {
        if !self.is_schema_initialized().await? {
            return Err(MindMapError::Custom(
                "❌ Database schema not initialized!\n\n\
                 Please run the following command to initialize the database:\n\n\
                 \x1b[1;32mmindmap init\x1b[0m"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Initialize database schema
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS conversation_messages (
                id BIGSERIAL PRIMARY KEY,
                user_id TEXT NOT NULL,
                author_kind TEXT NOT NULL CHECK (author_kind IN ('user', 'bot')),
                text TEXT NOT NULL,
                sent_at TIMESTAMP WITH TIME ZONE NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_conversation_messages_user ON conversation_messages (user_id, id)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS mindmap_keywords (
                id BIGSERIAL PRIMARY KEY,
                keyword TEXT NOT NULL,
                created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS mindmap_relations (
                id BIGSERIAL PRIMARY KEY,
                source TEXT NOT NULL,
                target TEXT NOT NULL,
                weight DOUBLE PRECISION NOT NULL,
                created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        tracing::info!("Database schema initialized");
        Ok(())
    }

    /// Drop all tables owned by this crate
    pub async fn drop_schema(&self) -> Result<()> {
        for table_name in REQUIRED_TABLES {
            sqlx::query(&format!("DROP TABLE IF EXISTS {table_name}"))
                .execute(&self.pool)
                .await?;
        }
        tracing::warn!("Dropped mind map tables");
        Ok(())
    }
}

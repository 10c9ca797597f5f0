use async_trait::async_trait;

use super::Database;
use crate::models::{KeywordRecord, RelationRecord};
use crate::store::AnalysisSink;
use crate::Result;

#[async_trait]
impl AnalysisSink for Database {
    async fn save_keywords(&self, records: &[KeywordRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;
        for record in records {
            sqlx::query("INSERT INTO mindmap_keywords (keyword, created_at) VALUES ($1, $2)")
                .bind(&record.keyword)
                .bind(record.created_at)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        tracing::debug!("Saved {} keywords", records.len());
        Ok(())
    }

    async fn save_relations(&self, records: &[RelationRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;
        for record in records {
            sqlx::query(
                r"
                INSERT INTO mindmap_relations (source, target, weight, created_at)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(&record.source)
            .bind(&record.target)
            .bind(record.weight)
            .bind(record.created_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        tracing::debug!("Saved {} relations", records.len());
        Ok(())
    }
}

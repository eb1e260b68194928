use async_trait::async_trait;
use gate_access_db::models::history::HistoryEntryModel;
use gate_access_db::repository::load_history::LoadHistory;
use sqlx::types::Json;
use sqlx::Row;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::PrincipalRepositoryImpl;

impl PrincipalRepositoryImpl {
    pub(super) async fn load_history_impl(
        repo: &PrincipalRepositoryImpl,
        principal_id: Uuid,
        limit: usize,
    ) -> Result<Option<Vec<HistoryEntryModel>>, Box<dyn Error + Send + Sync>> {
        // One row per returned entry, or a single row with NULL entry when the
        // principal exists but has no history. No rows: unknown principal.
        let rows = sqlx::query(
            r#"
            SELECT h.ord, h.entry
            FROM principal p
            LEFT JOIN LATERAL (
                SELECT t.ord, t.entry
                FROM jsonb_array_elements(COALESCE(p.access_history, '[]'::jsonb))
                     WITH ORDINALITY AS t(entry, ord)
                ORDER BY t.ord DESC
                LIMIT $2
            ) h ON TRUE
            WHERE p.id = $1
            "#,
        )
        .bind(principal_id)
        .bind(limit as i64)
        .fetch_all(&*repo.pool)
        .await?;

        if rows.is_empty() {
            return Ok(None);
        }

        let mut entries: Vec<(i64, HistoryEntryModel)> = Vec::with_capacity(rows.len());
        for row in rows {
            let ord: Option<i64> = row.try_get("ord")?;
            let entry: Option<Json<HistoryEntryModel>> = row.try_get("entry")?;
            if let (Some(ord), Some(Json(entry))) = (ord, entry) {
                entries.push((ord, entry));
            }
        }
        entries.sort_by_key(|(ord, _)| *ord);

        Ok(Some(entries.into_iter().map(|(_, entry)| entry).collect()))
    }
}

#[async_trait]
impl LoadHistory for PrincipalRepositoryImpl {
    async fn load_history(
        &self,
        principal_id: Uuid,
        limit: usize,
    ) -> Result<Option<Vec<HistoryEntryModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_history_impl(self, principal_id, limit).await
    }
}

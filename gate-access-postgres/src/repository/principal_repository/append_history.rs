use async_trait::async_trait;
use gate_access_db::models::history::HistoryEntryModel;
use gate_access_db::repository::append_history::AppendHistory;
use sqlx::types::Json;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::PrincipalRepositoryImpl;

impl PrincipalRepositoryImpl {
    pub(super) async fn append_history_impl(
        repo: &PrincipalRepositoryImpl,
        principal_id: Uuid,
        entry: &HistoryEntryModel,
    ) -> Result<bool, Box<dyn Error + Send + Sync>> {
        // COALESCE initializes a missing history with the single new entry;
        // `||` appends in place, so concurrent appends never overwrite each other.
        let result = sqlx::query(
            r#"
            UPDATE principal
            SET access_history = COALESCE(access_history, '[]'::jsonb) || jsonb_build_array($2::jsonb),
                last_access = $3,
                last_gate_id = $4,
                last_gate_name = $5
            WHERE id = $1
            "#,
        )
        .bind(principal_id)
        .bind(Json(entry))
        .bind(entry.timestamp)
        .bind(entry.gate_id.as_str())
        .bind(entry.gate_name.as_str())
        .execute(&*repo.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl AppendHistory for PrincipalRepositoryImpl {
    async fn append_history(
        &self,
        principal_id: Uuid,
        entry: &HistoryEntryModel,
    ) -> Result<bool, Box<dyn Error + Send + Sync>> {
        Self::append_history_impl(self, principal_id, entry).await
    }
}

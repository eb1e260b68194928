use async_trait::async_trait;
use gate_access_db::models::gate::GateModel;
use gate_access_db::repository::find_gate_by_gate_id::FindGateByGateId;
use crate::utils::TryFromRow;
use std::error::Error;

use super::repo_impl::GateRepositoryImpl;

impl GateRepositoryImpl {
    pub(super) async fn find_by_gate_id_impl(
        repo: &GateRepositoryImpl,
        gate_id: &str,
    ) -> Result<Option<GateModel>, Box<dyn Error + Send + Sync>> {
        let row = sqlx::query(
            r#"
            SELECT id, gate_id, name, location, status, permitted_access_levels,
                   total_scans, created_at, updated_at, last_scanned, last_restart
            FROM gate
            WHERE gate_id = $1
            "#,
        )
        .bind(gate_id)
        .fetch_optional(&*repo.pool)
        .await?;

        row.map(|row| GateModel::try_from_row(&row)).transpose()
    }
}

#[async_trait]
impl FindGateByGateId for GateRepositoryImpl {
    async fn find_by_gate_id(
        &self,
        gate_id: &str,
    ) -> Result<Option<GateModel>, Box<dyn Error + Send + Sync>> {
        Self::find_by_gate_id_impl(self, gate_id).await
    }
}

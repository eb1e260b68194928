use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gate_access_db::repository::increment_scan_count::IncrementScanCount;
use std::error::Error;

use super::repo_impl::GateRepositoryImpl;

impl GateRepositoryImpl {
    pub(super) async fn increment_scan_count_impl(
        repo: &GateRepositoryImpl,
        gate_id: &str,
        scanned_at: DateTime<Utc>,
    ) -> Result<bool, Box<dyn Error + Send + Sync>> {
        let result = sqlx::query(
            r#"
            UPDATE gate
            SET total_scans = total_scans + 1,
                last_scanned = $2
            WHERE gate_id = $1
            "#,
        )
        .bind(gate_id)
        .bind(scanned_at)
        .execute(&*repo.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl IncrementScanCount for GateRepositoryImpl {
    async fn increment_scan_count(
        &self,
        gate_id: &str,
        scanned_at: DateTime<Utc>,
    ) -> Result<bool, Box<dyn Error + Send + Sync>> {
        Self::increment_scan_count_impl(self, gate_id, scanned_at).await
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::gate_repository::test_utils::{create_test_gate, insert_test_gate};
    use crate::test_helper::{random, setup_test_context};
    use chrono::Utc;
    use gate_access_db::models::gate::GateStatus;
    use gate_access_db::repository::find_gate_by_gate_id::FindGateByGateId;
    use gate_access_db::repository::increment_scan_count::IncrementScanCount;

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_concurrent_increments_are_not_lost() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let gate_repo = ctx.repos().gate_repository.clone();

        let gate = create_test_gate(&format!("GATE-{}", random(8)), GateStatus::Active, &["Guest"]);
        insert_test_gate(&ctx.pool, &gate).await?;

        let mut handles = Vec::new();
        for _ in 0..10 {
            let repo = gate_repo.clone();
            let gate_id = gate.gate_id.to_string();
            handles.push(tokio::spawn(async move {
                repo.increment_scan_count(&gate_id, Utc::now()).await
            }));
        }
        for handle in handles {
            assert!(handle.await??);
        }

        let found = gate_repo.find_by_gate_id(gate.gate_id.as_str()).await?.expect("gate exists");
        assert_eq!(found.total_scans, 10);
        assert!(found.last_scanned.is_some());

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_increment_unknown_gate() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let gate_repo = &ctx.repos().gate_repository;

        let updated = gate_repo
            .increment_scan_count(&format!("MISSING-{}", random(8)), Utc::now())
            .await?;
        assert!(!updated);

        Ok(())
    }
}

use async_trait::async_trait;
use gate_access_db::models::access_log::AccessLogModel;
use gate_access_db::repository::create_access_log::CreateAccessLog;
use std::error::Error;

use super::repo_impl::AccessLogRepositoryImpl;

impl AccessLogRepositoryImpl {
    pub(super) async fn create_impl(
        repo: &AccessLogRepositoryImpl,
        record: &AccessLogModel,
    ) -> Result<AccessLogModel, Box<dyn Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO access_log (
                id, event_timestamp, access_date, access_clock, unix_time,
                gate_id, gate_name, location,
                nfc_id, hex_uid, processed_hex,
                tx_hash, block_time, stored_value, summary_digest, blockchain_error,
                principal_id, name, email, position, access_level,
                access_status, deny_reason, access_method, hash
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                    $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25)
            "#,
        )
        .bind(record.id)
        .bind(record.timestamp)
        .bind(record.access_time.date.as_str())
        .bind(record.access_time.time.as_str())
        .bind(record.access_time.unix_time)
        .bind(record.gate_id.as_str())
        .bind(record.gate_name.as_str())
        .bind(record.location.as_str())
        .bind(record.nfc_id.as_ref().map(|s| s.as_str()))
        .bind(record.card_data.hex_uid.as_str())
        .bind(record.card_data.processed_hex.as_str())
        .bind(record.blockchain_data.tx_hash.as_deref())
        .bind(record.blockchain_data.block_time.as_str())
        .bind(record.blockchain_data.stored_value.as_deref())
        .bind(record.blockchain_data.summary_digest.as_str())
        .bind(record.blockchain_error.as_deref())
        .bind(record.principal_id)
        .bind(record.name.as_str())
        .bind(record.email.as_ref().map(|s| s.as_str()))
        .bind(record.position.as_ref().map(|s| s.as_str()))
        .bind(record.access_level.as_ref().map(|s| s.as_str()))
        .bind(record.access_status)
        .bind(record.deny_reason.map(|r| r.to_string()))
        .bind(record.access_method.as_str())
        .bind(record.hash)
        .execute(&*repo.pool)
        .await?;

        Ok(record.clone())
    }
}

#[async_trait]
impl CreateAccessLog for AccessLogRepositoryImpl {
    async fn create(
        &self,
        record: &AccessLogModel,
    ) -> Result<AccessLogModel, Box<dyn Error + Send + Sync>> {
        Self::create_impl(self, record).await
    }
}

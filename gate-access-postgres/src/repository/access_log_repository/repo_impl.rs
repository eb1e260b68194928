use gate_access_api::DenyReason;
use gate_access_db::models::access_log::AccessLogModel;
use gate_access_db::models::history::{AccessTime, BlockchainData, CardData};
use crate::utils::{get_heapless_string, get_optional_heapless_string, get_optional_parsed, TryFromRow};
use sqlx::{postgres::PgRow, PgPool, Row};
use std::error::Error;
use std::sync::Arc;

pub struct AccessLogRepositoryImpl {
    pub(crate) pool: Arc<PgPool>,
}

impl AccessLogRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for AccessLogModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(AccessLogModel {
            id: row.try_get("id")?,
            timestamp: row.try_get("event_timestamp")?,
            access_time: AccessTime {
                date: row.try_get("access_date")?,
                time: row.try_get("access_clock")?,
                unix_time: row.try_get("unix_time")?,
            },
            gate_id: get_heapless_string(row, "gate_id")?,
            gate_name: get_heapless_string(row, "gate_name")?,
            location: get_heapless_string(row, "location")?,
            nfc_id: get_optional_heapless_string(row, "nfc_id")?,
            card_data: CardData {
                hex_uid: row.try_get("hex_uid")?,
                processed_hex: row.try_get("processed_hex")?,
            },
            blockchain_data: BlockchainData {
                tx_hash: row.try_get("tx_hash")?,
                block_time: row.try_get("block_time")?,
                stored_value: row.try_get("stored_value")?,
                summary_digest: row.try_get("summary_digest")?,
            },
            blockchain_error: row.try_get("blockchain_error")?,
            principal_id: row.try_get("principal_id")?,
            name: get_heapless_string(row, "name")?,
            email: get_optional_heapless_string(row, "email")?,
            position: get_optional_heapless_string(row, "position")?,
            access_level: get_optional_heapless_string(row, "access_level")?,
            access_status: row.try_get("access_status")?,
            deny_reason: get_optional_parsed::<DenyReason>(row, "deny_reason")?,
            access_method: get_heapless_string(row, "access_method")?,
            hash: row.try_get("hash")?,
        })
    }
}

use chrono::Utc;
use gate_access_api::AccessStatus;
use gate_access_db::models::history::{AccessTime, BlockchainData, CardData, HistoryEntryModel, HISTORY_ACCESS_METHOD};
use gate_access_db::models::principal::PrincipalModel;
use gate_access_db::utils::hash_as_i64;
use heapless::String as HeaplessString;
use sqlx::PgPool;
use uuid::Uuid;

pub fn create_test_principal(name: &str, identity_key: &str, access_level: &str) -> PrincipalModel {
    let now = Utc::now();
    PrincipalModel {
        id: Uuid::new_v4(),
        identity_key: HeaplessString::try_from(identity_key).unwrap(),
        identity_key_hash: hash_as_i64(&identity_key).unwrap(),
        name: HeaplessString::try_from(name).unwrap(),
        email: Some(HeaplessString::try_from("holder@example.com").unwrap()),
        position: Some(HeaplessString::try_from("developer").unwrap()),
        access_level: HeaplessString::try_from(access_level).unwrap(),
        active: true,
        last_access: None,
        last_gate_id: None,
        last_gate_name: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn create_test_history_entry(identity_key: &str, gate_id: &str) -> HistoryEntryModel {
    let timestamp = Utc::now();
    HistoryEntryModel {
        timestamp,
        access_time: AccessTime::from_timestamp(timestamp),
        nfc_id: identity_key.to_string(),
        gate_id: gate_id.to_string(),
        gate_name: "Server Room".to_string(),
        card_data: CardData {
            hex_uid: "04:A3:B1:9F".to_string(),
            processed_hex: "9F:B1:A3:04".to_string(),
        },
        blockchain_data: BlockchainData {
            tx_hash: Some("0xabc".to_string()),
            block_time: timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            stored_value: Some(identity_key.to_string()),
            summary_digest: "0".repeat(64),
        },
        access_status: AccessStatus::Granted,
        access_method: HISTORY_ACCESS_METHOD.to_string(),
    }
}

/// Principals are provisioned by the administration console; tests insert them directly.
pub async fn insert_test_principal(
    pool: &PgPool,
    principal: &PrincipalModel,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    sqlx::query(
        r#"
        INSERT INTO principal (id, identity_key, identity_key_hash, name, email, position,
                               access_level, active, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(principal.id)
    .bind(principal.identity_key.as_str())
    .bind(principal.identity_key_hash)
    .bind(principal.name.as_str())
    .bind(principal.email.as_ref().map(|s| s.as_str()))
    .bind(principal.position.as_ref().map(|s| s.as_str()))
    .bind(principal.access_level.as_str())
    .bind(principal.active)
    .bind(principal.created_at)
    .bind(principal.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

use chrono::Utc;
use gate_access_api::{AccessStatus, DenyReason};
use gate_access_db::models::access_log::{AccessLogModel, ACCESS_METHOD_GATE_TAG, UNAUTHORIZED_NAME};
use gate_access_db::models::history::{AccessTime, BlockchainData, CardData};
use heapless::String as HeaplessString;
use uuid::Uuid;

pub fn create_test_access_log(identity_key: &str, access_status: AccessStatus) -> AccessLogModel {
    let timestamp = Utc::now();
    let granted = access_status == AccessStatus::Granted;
    let record = AccessLogModel {
        id: Uuid::new_v4(),
        timestamp,
        access_time: AccessTime::from_timestamp(timestamp),
        gate_id: HeaplessString::try_from("GATE-TEST").unwrap(),
        gate_name: HeaplessString::try_from("Server Room").unwrap(),
        location: HeaplessString::try_from("Building A").unwrap(),
        nfc_id: Some(HeaplessString::try_from(identity_key).unwrap()),
        card_data: CardData {
            hex_uid: "04:A3:B1:9F".to_string(),
            processed_hex: "9F:B1:A3:04".to_string(),
        },
        blockchain_data: BlockchainData {
            tx_hash: None,
            block_time: timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            stored_value: None,
            summary_digest: "0".repeat(64),
        },
        blockchain_error: Some("ledger disabled".to_string()),
        principal_id: if granted { Some(Uuid::new_v4()) } else { None },
        name: HeaplessString::try_from(if granted { "Jane Doe" } else { UNAUTHORIZED_NAME }).unwrap(),
        email: None,
        position: None,
        access_level: None,
        access_status,
        deny_reason: if granted { None } else { Some(DenyReason::UnknownIdentity) },
        access_method: HeaplessString::try_from(ACCESS_METHOD_GATE_TAG).unwrap(),
        hash: 0,
    };
    record.sealed().unwrap()
}

use chrono::{DateTime, Utc};
use gate_access_api::AccessStatus;
use serde::{Deserialize, Serialize};

/// Access method recorded on personal history entries.
pub const HISTORY_ACCESS_METHOD: &str = "nfc_card";

/// Calendar breakdown of an event timestamp, kept alongside the timestamp so
/// that date filters and exports do not depend on timezone handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTime {
    pub date: String,
    pub time: String,
    pub unix_time: i64,
}

impl AccessTime {
    pub fn from_timestamp(timestamp: DateTime<Utc>) -> Self {
        Self {
            date: timestamp.format("%Y-%m-%d").to_string(),
            time: timestamp.format("%H:%M:%S").to_string(),
            unix_time: timestamp.timestamp(),
        }
    }
}

/// Raw and reordered UID as seen by the codec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardData {
    pub hex_uid: String,
    pub processed_hex: String,
}

/// Ledger anchoring outcome attached to a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockchainData {
    /// `None` when the anchor was not written
    pub tx_hash: Option<String>,
    pub block_time: String,
    /// Value written to the contract (the canonical identity)
    pub stored_value: Option<String>,
    /// blake3 digest of the event summary submitted with the anchor
    pub summary_digest: String,
}

/// # Documentation
/// One element of a principal's append-only access history.
///
/// Stored inside the principal document as an array element; entries are only
/// ever appended, never rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntryModel {
    pub timestamp: DateTime<Utc>,
    pub access_time: AccessTime,
    pub nfc_id: String,
    pub gate_id: String,
    pub gate_name: String,
    pub card_data: CardData,
    pub blockchain_data: BlockchainData,
    pub access_status: AccessStatus,
    pub access_method: String,
}

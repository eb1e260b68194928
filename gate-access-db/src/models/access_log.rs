use chrono::{DateTime, Utc};
use gate_access_api::{AccessStatus, DenyReason};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::models::history::{AccessTime, BlockchainData, CardData};
use crate::utils::hash_as_i64;

/// Name recorded when the presented tag does not resolve to a principal.
pub const UNAUTHORIZED_NAME: &str = "unauthorized";

/// Access method recorded on access log records.
pub const ACCESS_METHOD_GATE_TAG: &str = "GateTag";

/// # Documentation
/// - Immutable audit record, one per processed scan.
/// - Written for grants and denials alike, whether or not the ledger anchor succeeded.
/// - `hash` is the hash of the record with `hash` set to 0, so a stored record
///   can be re-verified against tampering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessLogModel {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub access_time: AccessTime,

    pub gate_id: HeaplessString<50>,
    pub gate_name: HeaplessString<100>,
    pub location: HeaplessString<100>,

    /// Canonical identity; `None` when the UID could not be decoded
    pub nfc_id: Option<HeaplessString<40>>,
    pub card_data: CardData,

    pub blockchain_data: BlockchainData,
    pub blockchain_error: Option<String>,

    /// References PrincipalModel.id when the tag resolved
    pub principal_id: Option<Uuid>,
    pub name: HeaplessString<100>,
    pub email: Option<HeaplessString<100>>,
    pub position: Option<HeaplessString<100>>,
    pub access_level: Option<HeaplessString<50>>,

    pub access_status: AccessStatus,
    pub deny_reason: Option<DenyReason>,
    pub access_method: HeaplessString<20>,

    pub hash: i64,
}

impl AccessLogModel {
    /// Hash of this record with the `hash` field zeroed.
    pub fn compute_hash(&self) -> Result<i64, String> {
        let mut unhashed = self.clone();
        unhashed.hash = 0;
        hash_as_i64(&unhashed)
    }

    /// Returns the record with its `hash` field populated.
    pub fn sealed(mut self) -> Result<Self, String> {
        self.hash = self.compute_hash()?;
        Ok(self)
    }

    pub fn verify_hash(&self) -> bool {
        matches!(self.compute_hash(), Ok(hash) if hash == self.hash)
    }
}

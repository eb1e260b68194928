use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use gate_access_api::PrincipalSummary;

/// # Documentation
/// A registered card holder.
///
/// - `identity_key` is the canonical decimal form of the holder's tag UID.
/// - `identity_key` is the indexed lookup column.
/// - `identity_key_hash` is a stored `hash_as_i64(identity_key)` fingerprint. Lookups
///   never read it, so rows provisioned without it still resolve.
/// - The access history is persisted with the principal but is not loaded into
///   this model; it is read through `LoadHistory` with a bounded view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrincipalModel {
    pub id: Uuid,
    pub identity_key: HeaplessString<40>,
    pub identity_key_hash: i64,
    pub name: HeaplessString<100>,
    pub email: Option<HeaplessString<100>>,
    pub position: Option<HeaplessString<100>>,
    pub access_level: HeaplessString<50>,
    pub active: bool,

    /// Denormalized snapshot of the most recent granted access
    pub last_access: Option<DateTime<Utc>>,
    pub last_gate_id: Option<HeaplessString<50>>,
    pub last_gate_name: Option<HeaplessString<100>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PrincipalModel {
    pub fn to_summary(&self) -> PrincipalSummary {
        PrincipalSummary {
            id: self.id,
            name: self.name.to_string(),
            email: self.email.as_ref().map(|s| s.to_string()),
            position: self.position.as_ref().map(|s| s.to_string()),
            access_level: self.access_level.to_string(),
        }
    }
}

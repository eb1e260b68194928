use chrono::{DateTime, Utc};
use gate_access_api::{AccessError, AccessStatus, DenyReason, ScanRequest};
use gate_access_db::utils::digest_hex;
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

/// A validated scan, immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEvent {
    pub event_id: Uuid,
    pub raw_tag: String,
    pub declared_length: Option<u32>,
    pub gate_id: String,
    pub received_at: DateTime<Utc>,
}

impl ScanEvent {
    /// Validates the request; a missing gate id or tag is `MalformedInput`.
    pub fn from_request(
        request: ScanRequest,
        event_id: Uuid,
        received_at: DateTime<Utc>,
    ) -> Result<Self, AccessError> {
        request.validate()?;
        let gate_id = request
            .gate_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AccessError::MalformedInput("No gateId provided".to_string()))?;
        if request.uid_hex.trim().is_empty() {
            return Err(AccessError::MalformedInput("No UID data provided".to_string()));
        }

        Ok(Self {
            event_id,
            raw_tag: request.uid_hex,
            declared_length: request.uid_length,
            gate_id,
            received_at,
        })
    }
}

/// What gets digested and linked between the audit record and the anchor.
#[derive(Debug, Clone, Serialize)]
pub struct EventSummary<'a> {
    pub event_id: Uuid,
    pub identity: Option<&'a str>,
    pub gate_id: &'a str,
    pub access_status: AccessStatus,
    pub deny_reason: Option<DenyReason>,
    pub timestamp: DateTime<Utc>,
}

impl EventSummary<'_> {
    /// blake3 hex digest of the summary.
    pub fn digest(&self) -> Result<String, String> {
        digest_hex(self)
    }
}

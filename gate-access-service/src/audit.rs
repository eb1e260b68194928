use std::sync::Arc;

use gate_access_api::AccessError;
use gate_access_db::models::access_log::{AccessLogModel, ACCESS_METHOD_GATE_TAG, UNAUTHORIZED_NAME};
use gate_access_db::models::gate::GateModel;
use gate_access_db::models::history::{AccessTime, BlockchainData, CardData};
use gate_access_db::models::principal::PrincipalModel;
use gate_access_db::repository::AccessLogRepository;
use heapless::String as HeaplessString;
use tracing::{error, info};
use uuid::Uuid;

use crate::codec::DecodedUid;
use crate::event::ScanEvent;
use crate::ledger::LedgerOutcome;
use crate::policy::Decision;

/// Format of `block_time` on audit and history records.
pub const BLOCK_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything known about a scan once its ledger outcome is settled.
#[derive(Debug, Clone, Copy)]
pub struct AuditEntry<'a> {
    pub event: &'a ScanEvent,
    pub uid: &'a DecodedUid,
    pub gate: &'a GateModel,
    pub principal: Option<&'a PrincipalModel>,
    pub decision: Decision,
    pub ledger: &'a LedgerOutcome,
    pub summary_digest: &'a str,
}

impl AuditEntry<'_> {
    pub fn card_data(&self) -> CardData {
        CardData {
            hex_uid: self.uid.original.clone(),
            processed_hex: self.uid.processed.clone(),
        }
    }

    pub fn blockchain_data(&self) -> BlockchainData {
        let tx_hash = self.ledger.tx_hash().map(str::to_string);
        BlockchainData {
            stored_value: tx_hash.as_ref().and(self.uid.identity.clone()),
            tx_hash,
            block_time: self.event.received_at.format(BLOCK_TIME_FORMAT).to_string(),
            summary_digest: self.summary_digest.to_string(),
        }
    }

    /// Builds the sealed access log record for this scan.
    pub fn to_record(&self) -> Result<AccessLogModel, String> {
        let nfc_id = self
            .uid
            .identity
            .as_deref()
            .map(|identity| {
                HeaplessString::try_from(identity).map_err(|_| format!("identity too long: {identity}"))
            })
            .transpose()?;
        let name = match self.principal {
            Some(principal) => principal.name.clone(),
            None => HeaplessString::try_from(UNAUTHORIZED_NAME)
                .map_err(|_| "name too long".to_string())?,
        };
        let access_method = HeaplessString::try_from(ACCESS_METHOD_GATE_TAG)
            .map_err(|_| "access method too long".to_string())?;

        AccessLogModel {
            id: Uuid::new_v4(),
            timestamp: self.event.received_at,
            access_time: AccessTime::from_timestamp(self.event.received_at),
            gate_id: self.gate.gate_id.clone(),
            gate_name: self.gate.name.clone(),
            location: self.gate.location.clone(),
            nfc_id,
            card_data: self.card_data(),
            blockchain_data: self.blockchain_data(),
            blockchain_error: self.ledger.error().map(str::to_string),
            principal_id: self.principal.map(|p| p.id),
            name,
            email: self.principal.and_then(|p| p.email.clone()),
            position: self.principal.and_then(|p| p.position.clone()),
            access_level: self.principal.map(|p| p.access_level.clone()),
            access_status: self.decision.access_status(),
            deny_reason: self.decision.reason(),
            access_method,
            hash: 0,
        }
        .sealed()
    }
}

/// Writes the one audit record every gate-resolved scan produces.
#[derive(Clone)]
pub struct AuditWriter {
    access_logs: Arc<dyn AccessLogRepository>,
}

impl AuditWriter {
    pub fn new(access_logs: Arc<dyn AccessLogRepository>) -> Self {
        Self { access_logs }
    }

    pub async fn record_access(&self, entry: AuditEntry<'_>) -> Result<AccessLogModel, AccessError> {
        let record = entry.to_record().map_err(|e| {
            error!(event_id = %entry.event.event_id, error = %e, "failed to build access log record");
            AccessError::Internal(e)
        })?;

        let stored = self.access_logs.create(&record).await.map_err(|e| {
            error!(event_id = %entry.event.event_id, error = %e, "failed to write access log record");
            AccessError::Internal(format!("access log write failed: {e}"))
        })?;

        info!(
            access_log_id = %stored.id,
            gate_id = %stored.gate_id,
            access_status = %stored.access_status,
            "access recorded"
        );
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::canonicalize;
    use chrono::{TimeZone, Utc};
    use gate_access_api::{AccessStatus, DenyReason};
    use gate_access_db::models::gate::GateStatus;

    fn event() -> ScanEvent {
        ScanEvent {
            event_id: Uuid::new_v4(),
            raw_tag: "04:A3:B1:9F".to_string(),
            declared_length: Some(4),
            gate_id: "GATE-01".to_string(),
            received_at: Utc.with_ymd_and_hms(2025, 5, 18, 19, 34, 53).unwrap(),
        }
    }

    fn gate() -> GateModel {
        let now = Utc::now();
        GateModel {
            id: Uuid::new_v4(),
            gate_id: HeaplessString::try_from("GATE-01").unwrap(),
            name: HeaplessString::try_from("Server Room").unwrap(),
            location: HeaplessString::try_from("Building A").unwrap(),
            status: GateStatus::Active,
            permitted_access_levels: vec!["IT Staff".to_string()],
            total_scans: 0,
            created_at: now,
            updated_at: now,
            last_scanned: None,
            last_restart: None,
        }
    }

    #[test]
    fn test_unknown_identity_record() {
        let event = event();
        let uid = canonicalize(&event.raw_tag, event.declared_length);
        let gate = gate();
        let ledger = LedgerOutcome::Unavailable {
            reason: "ledger disabled".to_string(),
        };
        let entry = AuditEntry {
            event: &event,
            uid: &uid,
            gate: &gate,
            principal: None,
            decision: Decision::Deny(DenyReason::UnknownIdentity),
            ledger: &ledger,
            summary_digest: "ab",
        };

        let record = entry.to_record().unwrap();
        assert_eq!(record.name.as_str(), UNAUTHORIZED_NAME);
        assert_eq!(record.access_status, AccessStatus::Denied);
        assert_eq!(record.deny_reason, Some(DenyReason::UnknownIdentity));
        assert_eq!(record.principal_id, None);
        assert_eq!(record.nfc_id.as_deref(), Some("2679218948"));
        assert_eq!(record.card_data.processed_hex, "9F:B1:A3:04");
        assert_eq!(record.blockchain_data.tx_hash, None);
        assert_eq!(record.blockchain_data.stored_value, None);
        assert_eq!(record.blockchain_data.block_time, "2025-05-18 19:34:53");
        assert_eq!(record.blockchain_error.as_deref(), Some("ledger disabled"));
        assert_eq!(record.access_method.as_str(), "GateTag");
        assert!(record.verify_hash());
    }

    #[test]
    fn test_anchored_record_stores_identity() {
        let event = event();
        let uid = canonicalize(&event.raw_tag, event.declared_length);
        let gate = gate();
        let ledger = LedgerOutcome::Anchored {
            tx_hash: "0xfeed".to_string(),
            summary_digest: "ab".to_string(),
        };
        let entry = AuditEntry {
            event: &event,
            uid: &uid,
            gate: &gate,
            principal: None,
            decision: Decision::Deny(DenyReason::UnknownIdentity),
            ledger: &ledger,
            summary_digest: "ab",
        };

        let data = entry.blockchain_data();
        assert_eq!(data.tx_hash.as_deref(), Some("0xfeed"));
        assert_eq!(data.stored_value.as_deref(), Some("2679218948"));
        assert_eq!(entry.to_record().unwrap().blockchain_error, None);
    }
}

use std::sync::Arc;

use gate_access_db::models::history::{AccessTime, HistoryEntryModel, HISTORY_ACCESS_METHOD};
use gate_access_db::models::principal::PrincipalModel;
use gate_access_db::repository::PrincipalRepository;
use tracing::{info, warn};

use crate::audit::AuditEntry;

/// Appends granted scans to the principal's personal history.
#[derive(Clone)]
pub struct HistoryUpdater {
    principals: Arc<dyn PrincipalRepository>,
}

impl HistoryUpdater {
    pub fn new(principals: Arc<dyn PrincipalRepository>) -> Self {
        Self { principals }
    }

    pub fn build_entry(entry: &AuditEntry<'_>) -> HistoryEntryModel {
        HistoryEntryModel {
            timestamp: entry.event.received_at,
            access_time: AccessTime::from_timestamp(entry.event.received_at),
            nfc_id: entry.uid.identity.clone().unwrap_or_default(),
            gate_id: entry.gate.gate_id.to_string(),
            gate_name: entry.gate.name.to_string(),
            card_data: entry.card_data(),
            blockchain_data: entry.blockchain_data(),
            access_status: entry.decision.access_status(),
            access_method: HISTORY_ACCESS_METHOD.to_string(),
        }
    }

    /// Returns whether the entry was applied. A principal removed since
    /// resolution, or a store fault, is logged and reported as `false`.
    pub async fn append_history(&self, principal: &PrincipalModel, entry: &HistoryEntryModel) -> bool {
        match self.principals.append_history(principal.id, entry).await {
            Ok(true) => {
                info!(principal_id = %principal.id, gate_id = %entry.gate_id, "history updated");
                true
            }
            Ok(false) => {
                warn!(principal_id = %principal.id, "principal disappeared before history append");
                false
            }
            Err(e) => {
                warn!(principal_id = %principal.id, error = %e, "history append failed");
                false
            }
        }
    }
}

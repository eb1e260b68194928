//! Sequencing of one scan through decode, resolution, policy and the
//! persistence side effects.
//!
//! Failure policy:
//! - no gate id, no tag, or an unknown gate rejects the scan before anything
//!   is persisted;
//! - a lookup or audit write fault rejects the scan as an internal error;
//! - ledger, history and scan counter failures are logged and only degrade
//!   the response.

pub mod state;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use gate_access_api::{AccessError, DenyReason, ScanRequest, ScanResponse};
use gate_access_db::repository::{AccessLogRepository, GateRepository, PrincipalRepository};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::audit::{AuditEntry, AuditWriter};
use crate::codec::canonicalize;
use crate::event::{EventSummary, ScanEvent};
use crate::history::HistoryUpdater;
use crate::ledger::writer::NO_DECODABLE_IDENTITY;
use crate::ledger::{LedgerOutcome, LedgerWriter};
use crate::policy::{evaluate, Decision};
use crate::resolver::{GateResolver, IdentityResolver};

pub use state::{Anchored, Decided, Decoded, EventStage, EventState, HistoryUpdated, Logged, Received, Resolved};

/// Runs scans through the pipeline. Stores and ledger are injected so the
/// orchestrator holds no process-wide state.
#[derive(Clone)]
pub struct EventOrchestrator {
    gates: Arc<dyn GateRepository>,
    gate_resolver: GateResolver,
    identity_resolver: IdentityResolver,
    ledger: LedgerWriter,
    audit: AuditWriter,
    history: HistoryUpdater,
}

impl EventOrchestrator {
    pub fn new(
        gates: Arc<dyn GateRepository>,
        principals: Arc<dyn PrincipalRepository>,
        access_logs: Arc<dyn AccessLogRepository>,
        ledger: LedgerWriter,
    ) -> Self {
        Self {
            gate_resolver: GateResolver::new(gates.clone()),
            identity_resolver: IdentityResolver::new(principals.clone()),
            gates,
            ledger,
            audit: AuditWriter::new(access_logs),
            history: HistoryUpdater::new(principals),
        }
    }

    pub fn ledger(&self) -> &LedgerWriter {
        &self.ledger
    }

    pub async fn process(&self, request: ScanRequest) -> Result<ScanResponse, AccessError> {
        self.process_at(request, Uuid::new_v4(), Utc::now()).await
    }

    #[instrument(
        name = "scan",
        skip(self, request, received_at),
        fields(gate_id = request.gate_id.as_deref().unwrap_or_default())
    )]
    pub async fn process_at(
        &self,
        request: ScanRequest,
        event_id: Uuid,
        received_at: DateTime<Utc>,
    ) -> Result<ScanResponse, AccessError> {
        let mut state = EventState::Received(Received {
            request,
            event_id,
            received_at,
        });
        while !state.is_terminal() {
            let from = state.stage();
            state = self.advance(state).await;
            debug!(?from, to = ?state.stage(), "pipeline transition");
        }
        state.into_result()
    }

    /// Performs exactly one transition. Terminal states are returned unchanged.
    pub async fn advance(&self, state: EventState) -> EventState {
        match state {
            EventState::Received(received) => self.decode(received),
            EventState::Decoded(decoded) => self.resolve(decoded).await,
            EventState::Resolved(resolved) => self.decide(*resolved),
            EventState::Decided(decided) => {
                if decided.resolved.uid.is_decodable() {
                    self.anchor(*decided).await
                } else {
                    let ledger = LedgerOutcome::Unavailable {
                        reason: NO_DECODABLE_IDENTITY.to_string(),
                    };
                    self.log(*decided, ledger).await
                }
            }
            EventState::Anchored(anchored) => {
                let Anchored { decided, ledger } = *anchored;
                self.log(decided, ledger).await
            }
            EventState::Logged(logged) => {
                let granted_principal =
                    logged.decided.decision.is_grant() && logged.decided.resolved.principal.is_some();
                if granted_principal {
                    self.update_history(*logged).await
                } else {
                    complete(*logged, None)
                }
            }
            EventState::HistoryUpdated(updated) => {
                let HistoryUpdated { logged, applied } = *updated;
                complete(logged, Some(applied))
            }
            terminal @ (EventState::Completed(_) | EventState::Rejected(_)) => terminal,
        }
    }

    fn decode(&self, received: Received) -> EventState {
        let event = match ScanEvent::from_request(received.request, received.event_id, received.received_at) {
            Ok(event) => event,
            Err(e) => {
                info!(error = %e, "scan rejected");
                return EventState::Rejected(e);
            }
        };
        let uid = canonicalize(&event.raw_tag, event.declared_length);
        debug!(
            original = %uid.original,
            standardized = %uid.standardized,
            processed = %uid.processed,
            identity = ?uid.identity,
            "uid decoded"
        );
        EventState::Decoded(Decoded { event, uid })
    }

    async fn resolve(&self, decoded: Decoded) -> EventState {
        let Decoded { event, uid } = decoded;
        let (gate, principal) = tokio::join!(
            self.gate_resolver.resolve(&event.gate_id),
            self.identity_resolver.resolve(uid.identity.as_deref())
        );

        let gate = match gate {
            Ok(Some(gate)) => gate,
            Ok(None) => {
                info!(gate_id = %event.gate_id, "scan rejected: unknown gate");
                return EventState::Rejected(AccessError::GateNotFound(event.gate_id));
            }
            Err(e) => return EventState::Rejected(e),
        };
        let principal = match principal {
            Ok(principal) => principal,
            Err(e) => return EventState::Rejected(e),
        };

        EventState::Resolved(Box::new(Resolved {
            event,
            uid,
            gate,
            principal,
        }))
    }

    fn decide(&self, resolved: Resolved) -> EventState {
        let decision = evaluate(Some(&resolved.gate), resolved.principal.as_ref());
        let summary = EventSummary {
            event_id: resolved.event.event_id,
            identity: resolved.uid.identity.as_deref(),
            gate_id: &resolved.event.gate_id,
            access_status: decision.access_status(),
            deny_reason: decision.reason(),
            timestamp: resolved.event.received_at,
        };
        let summary_digest = match summary.digest() {
            Ok(digest) => digest,
            Err(e) => return EventState::Rejected(AccessError::Internal(e)),
        };

        info!(
            access_status = %decision.access_status(),
            reason = ?decision.reason(),
            "access decided"
        );
        EventState::Decided(Box::new(Decided {
            resolved,
            decision,
            summary_digest,
        }))
    }

    async fn anchor(&self, decided: Decided) -> EventState {
        let identity = decided.resolved.uid.identity.as_deref().unwrap_or_default();
        let ledger = self.ledger.anchor(identity, &decided.summary_digest).await;
        EventState::Anchored(Box::new(Anchored { decided, ledger }))
    }

    async fn log(&self, decided: Decided, ledger: LedgerOutcome) -> EventState {
        let entry = audit_entry(&decided, &ledger);
        let (record, counted) = tokio::join!(
            self.audit.record_access(entry),
            self.gates
                .increment_scan_count(&decided.resolved.event.gate_id, decided.resolved.event.received_at)
        );

        match counted {
            Ok(true) => {}
            Ok(false) => warn!(gate_id = %decided.resolved.event.gate_id, "scan counter not updated"),
            Err(e) => warn!(gate_id = %decided.resolved.event.gate_id, error = %e, "scan counter update failed"),
        }

        match record {
            Ok(record) => EventState::Logged(Box::new(Logged {
                decided,
                ledger,
                record,
            })),
            Err(e) => EventState::Rejected(e),
        }
    }

    async fn update_history(&self, logged: Logged) -> EventState {
        let applied = match &logged.decided.resolved.principal {
            Some(principal) => {
                let entry = HistoryUpdater::build_entry(&audit_entry(&logged.decided, &logged.ledger));
                self.history.append_history(principal, &entry).await
            }
            None => false,
        };
        EventState::HistoryUpdated(Box::new(HistoryUpdated { logged, applied }))
    }
}

fn audit_entry<'a>(decided: &'a Decided, ledger: &'a LedgerOutcome) -> AuditEntry<'a> {
    AuditEntry {
        event: &decided.resolved.event,
        uid: &decided.resolved.uid,
        gate: &decided.resolved.gate,
        principal: decided.resolved.principal.as_ref(),
        decision: decided.decision,
        ledger,
        summary_digest: &decided.summary_digest,
    }
}

fn message(decided: &Decided) -> String {
    let name = decided
        .resolved
        .principal
        .as_ref()
        .map(|p| p.name.as_str())
        .unwrap_or("Unknown");
    match decided.decision {
        Decision::Grant => format!("Access granted to {name}"),
        Decision::Deny(DenyReason::UnknownIdentity) => "No user found with this NFC ID".to_string(),
        Decision::Deny(DenyReason::InsufficientAccessLevel) => {
            format!("Access denied to {name}: insufficient access level")
        }
        Decision::Deny(DenyReason::GateInactive) => {
            format!("Gate {} is not active", decided.resolved.gate.gate_id)
        }
        Decision::Deny(DenyReason::GateNotFound) => {
            format!("Gate {} not found", decided.resolved.event.gate_id)
        }
    }
}

fn complete(logged: Logged, history_updated: Option<bool>) -> EventState {
    let Logged {
        decided,
        ledger,
        record,
    } = logged;
    let message = message(&decided);
    let Resolved {
        event,
        uid,
        gate,
        principal,
    } = decided.resolved;

    EventState::Completed(Box::new(ScanResponse {
        message,
        original_uid: uid.original,
        standardized_uid: uid.standardized,
        processed_uid: uid.processed,
        uid_length: event.declared_length,
        decimal_value: uid.identity,
        gate_id: gate.gate_id.to_string(),
        gate_name: gate.name.to_string(),
        location: gate.location.to_string(),
        access_status: decided.decision.access_status(),
        reason: decided.decision.reason(),
        user_found: principal.is_some(),
        user: principal.as_ref().map(|p| p.to_summary()),
        blockchain_tx: ledger.tx_hash().map(str::to_string),
        blockchain_error: ledger.error().map(str::to_string),
        history_updated,
        access_log_id: record.id,
    }))
}

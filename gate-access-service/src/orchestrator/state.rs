//! States of one scan moving through the pipeline.
//!
//! Each variant carries what the pipeline knows at that point. Transitions only
//! move forward (`EventStage` is ordered); `Completed` and `Rejected` are
//! terminal.

use chrono::{DateTime, Utc};
use gate_access_api::{AccessError, ScanRequest, ScanResponse};
use gate_access_db::models::access_log::AccessLogModel;
use gate_access_db::models::gate::GateModel;
use gate_access_db::models::principal::PrincipalModel;
use uuid::Uuid;

use crate::codec::DecodedUid;
use crate::event::ScanEvent;
use crate::ledger::LedgerOutcome;
use crate::policy::Decision;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventStage {
    Received,
    Decoded,
    Resolved,
    Decided,
    Anchored,
    Logged,
    HistoryUpdated,
    Completed,
    Rejected,
}

#[derive(Debug, Clone)]
pub struct Received {
    pub request: ScanRequest,
    pub event_id: Uuid,
    pub received_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Decoded {
    pub event: ScanEvent,
    pub uid: DecodedUid,
}

#[derive(Debug, Clone)]
pub struct Resolved {
    pub event: ScanEvent,
    pub uid: DecodedUid,
    pub gate: GateModel,
    pub principal: Option<PrincipalModel>,
}

#[derive(Debug, Clone)]
pub struct Decided {
    pub resolved: Resolved,
    pub decision: Decision,
    pub summary_digest: String,
}

#[derive(Debug, Clone)]
pub struct Anchored {
    pub decided: Decided,
    pub ledger: LedgerOutcome,
}

/// Reached from `Anchored`, or straight from `Decided` when there was no
/// identity to anchor.
#[derive(Debug, Clone)]
pub struct Logged {
    pub decided: Decided,
    pub ledger: LedgerOutcome,
    pub record: AccessLogModel,
}

#[derive(Debug, Clone)]
pub struct HistoryUpdated {
    pub logged: Logged,
    pub applied: bool,
}

#[derive(Debug, Clone)]
pub enum EventState {
    Received(Received),
    Decoded(Decoded),
    Resolved(Box<Resolved>),
    Decided(Box<Decided>),
    Anchored(Box<Anchored>),
    Logged(Box<Logged>),
    HistoryUpdated(Box<HistoryUpdated>),
    Completed(Box<ScanResponse>),
    Rejected(AccessError),
}

impl EventState {
    pub fn stage(&self) -> EventStage {
        match self {
            EventState::Received(_) => EventStage::Received,
            EventState::Decoded(_) => EventStage::Decoded,
            EventState::Resolved(_) => EventStage::Resolved,
            EventState::Decided(_) => EventStage::Decided,
            EventState::Anchored(_) => EventStage::Anchored,
            EventState::Logged(_) => EventStage::Logged,
            EventState::HistoryUpdated(_) => EventStage::HistoryUpdated,
            EventState::Completed(_) => EventStage::Completed,
            EventState::Rejected(_) => EventStage::Rejected,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, EventState::Completed(_) | EventState::Rejected(_))
    }

    /// Caller-facing result of a terminal state.
    pub fn into_result(self) -> Result<ScanResponse, AccessError> {
        match self {
            EventState::Completed(response) => Ok(*response),
            EventState::Rejected(error) => Err(error),
            other => Err(AccessError::Internal(format!(
                "pipeline stopped in non-terminal state {:?}",
                other.stage()
            ))),
        }
    }
}

use gate_access_api::{AccessStatus, DenyReason};
use gate_access_db::models::gate::GateModel;
use gate_access_db::models::principal::PrincipalModel;

/// Outcome of the access policy for one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Grant,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_grant(&self) -> bool {
        matches!(self, Decision::Grant)
    }

    pub fn access_status(&self) -> AccessStatus {
        match self {
            Decision::Grant => AccessStatus::Granted,
            Decision::Deny(_) => AccessStatus::Denied,
        }
    }

    pub fn reason(&self) -> Option<DenyReason> {
        match self {
            Decision::Grant => None,
            Decision::Deny(reason) => Some(*reason),
        }
    }
}

/// Evaluates the gate allowlist against the presenting principal.
///
/// Deny reasons are checked in order: gate not found, gate inactive, unknown
/// identity, insufficient access level. A principal flagged inactive counts as
/// unknown.
pub fn evaluate(gate: Option<&GateModel>, principal: Option<&PrincipalModel>) -> Decision {
    let Some(gate) = gate else {
        return Decision::Deny(DenyReason::GateNotFound);
    };
    if !gate.is_active() {
        return Decision::Deny(DenyReason::GateInactive);
    }
    let Some(principal) = principal.filter(|p| p.active) else {
        return Decision::Deny(DenyReason::UnknownIdentity);
    };
    if gate.permits(principal.access_level.as_str()) {
        Decision::Grant
    } else {
        Decision::Deny(DenyReason::InsufficientAccessLevel)
    }
}

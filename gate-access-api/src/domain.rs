use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Outcome recorded for a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "access_status", rename_all = "lowercase"))]
pub enum AccessStatus {
    Granted,
    Denied,
}

impl fmt::Display for AccessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessStatus::Granted => write!(f, "granted"),
            AccessStatus::Denied => write!(f, "denied"),
        }
    }
}

impl FromStr for AccessStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "granted" => Ok(AccessStatus::Granted),
            "denied" => Ok(AccessStatus::Denied),
            _ => Err(()),
        }
    }
}

/// Why a scan was denied. Variants are listed in the order the policy checks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DenyReason {
    #[serde(rename = "gate not found")]
    GateNotFound,
    #[serde(rename = "gate inactive")]
    GateInactive,
    #[serde(rename = "unknown identity")]
    UnknownIdentity,
    #[serde(rename = "insufficient access level")]
    InsufficientAccessLevel,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenyReason::GateNotFound => write!(f, "gate not found"),
            DenyReason::GateInactive => write!(f, "gate inactive"),
            DenyReason::UnknownIdentity => write!(f, "unknown identity"),
            DenyReason::InsufficientAccessLevel => write!(f, "insufficient access level"),
        }
    }
}

impl FromStr for DenyReason {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gate not found" => Ok(DenyReason::GateNotFound),
            "gate inactive" => Ok(DenyReason::GateInactive),
            "unknown identity" => Ok(DenyReason::UnknownIdentity),
            "insufficient access level" => Ok(DenyReason::InsufficientAccessLevel),
            _ => Err(()),
        }
    }
}

/// Scan submitted by a gate's reader bridge.
///
/// Field names follow the wire format emitted by the device firmware
/// (`uidHex`, `uidLength`, `gateId`).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "No UID data provided"))]
    pub uid_hex: String,

    /// Upper bound on the byte groups read from `uid_hex`; larger values keep
    /// every group.
    #[serde(default)]
    pub uid_length: Option<u32>,

    #[validate(
        required(message = "No gateId provided"),
        length(min = 1, message = "No gateId provided")
    )]
    pub gate_id: Option<String>,
}

/// Caller-facing view of a resolved principal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrincipalSummary {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub position: Option<String>,
    pub access_level: String,
}

/// Result of a processed scan. Both grants and denials are carried here; the
/// HTTP status only distinguishes an inactive gate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanResponse {
    pub message: String,
    pub original_uid: String,
    pub standardized_uid: String,
    pub processed_uid: String,
    pub uid_length: Option<u32>,
    pub decimal_value: Option<String>,
    pub gate_id: String,
    pub gate_name: String,
    pub location: String,
    pub access_status: AccessStatus,
    pub reason: Option<DenyReason>,
    pub user_found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<PrincipalSummary>,
    pub blockchain_tx: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockchain_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_updated: Option<bool>,
    pub access_log_id: Uuid,
}

impl ScanResponse {
    pub fn status_code(&self) -> u16 {
        match self.reason {
            Some(DenyReason::GateInactive) => 403,
            _ => 200,
        }
    }
}

/// Query string of the access log listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessLogQuery {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    pub status: Option<AccessStatus>,
    pub identity_key: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginationMeta {
    pub total_logs: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub per_page: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessLogListResponse<T> {
    pub logs: Vec<T>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse<T> {
    pub principal_id: Uuid,
    pub limit: usize,
    pub entries: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerStatusResponse {
    pub status: String,
    pub latency_ms: f64,
    pub chain_id: u64,
    pub latest_block: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionVerification {
    pub tx_hash: String,
    pub found: bool,
    pub block_number: Option<u64>,
    pub success: Option<bool>,
}

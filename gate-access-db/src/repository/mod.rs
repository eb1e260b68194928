pub mod append_history;
pub mod create_access_log;
pub mod find_gate_by_gate_id;
pub mod find_principal_by_identity_key;
pub mod increment_scan_count;
pub mod load_access_logs;
pub mod load_history;
pub mod pagination;

// Re-exports
pub use append_history::*;
pub use create_access_log::*;
pub use find_gate_by_gate_id::*;
pub use find_principal_by_identity_key::*;
pub use increment_scan_count::*;
pub use load_access_logs::*;
pub use load_history::*;
pub use pagination::*;

/// Everything the scan pipeline needs from the gate store.
pub trait GateRepository: FindGateByGateId + IncrementScanCount {}

impl<T: FindGateByGateId + IncrementScanCount> GateRepository for T {}

/// Everything the scan pipeline needs from the principal store.
pub trait PrincipalRepository: FindPrincipalByIdentityKey + AppendHistory + LoadHistory {}

impl<T: FindPrincipalByIdentityKey + AppendHistory + LoadHistory> PrincipalRepository for T {}

/// Everything the scan pipeline needs from the access log store.
pub trait AccessLogRepository: CreateAccessLog + LoadAccessLogs {}

impl<T: CreateAccessLog + LoadAccessLogs> AccessLogRepository for T {}

#![allow(dead_code)]

use std::collections::HashMap;
use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gate_access_db::models::access_log::AccessLogModel;
use gate_access_db::models::gate::{GateModel, GateStatus};
use gate_access_db::models::history::HistoryEntryModel;
use gate_access_db::models::principal::PrincipalModel;
use gate_access_db::repository::{
    AccessLogFilter, AppendHistory, CreateAccessLog, FindGateByGateId, FindPrincipalByIdentityKey,
    IncrementScanCount, LoadAccessLogs, LoadHistory, Page, PageRequest,
};
use gate_access_db::utils::hash_as_i64;
use gate_access_service::ledger::{ChainStatus, LedgerClient, LedgerError, TxReceipt};
use gate_access_service::{EventOrchestrator, LedgerWriter};
use heapless::String as HeaplessString;
use uuid::Uuid;

pub const REFERENCE_TAG: &str = "04:A3:B1:9F";
pub const REFERENCE_IDENTITY: &str = "2679218948";

type StoreResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

/// Gate, principal and access log stores backed by vectors.
#[derive(Default)]
pub struct InMemoryStore {
    pub gates: Mutex<Vec<GateModel>>,
    pub principals: Mutex<Vec<PrincipalModel>>,
    pub histories: Mutex<HashMap<Uuid, Vec<HistoryEntryModel>>>,
    pub access_logs: Mutex<Vec<AccessLogModel>>,
    pub fail_access_log_writes: AtomicBool,
    pub fail_lookups: AtomicBool,
    /// Simulates the principal being deleted between resolution and append
    pub drop_principal_before_append: AtomicBool,
}

impl InMemoryStore {
    pub fn with(gates: Vec<GateModel>, principals: Vec<PrincipalModel>) -> Arc<Self> {
        let store = Self::default();
        *store.gates.lock().unwrap() = gates;
        *store.principals.lock().unwrap() = principals;
        Arc::new(store)
    }

    pub fn access_logs(&self) -> Vec<AccessLogModel> {
        self.access_logs.lock().unwrap().clone()
    }

    pub fn history_of(&self, principal_id: Uuid) -> Vec<HistoryEntryModel> {
        self.histories
            .lock()
            .unwrap()
            .get(&principal_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn history_len(&self) -> usize {
        self.histories.lock().unwrap().values().map(Vec::len).sum()
    }

    pub fn gate(&self, gate_id: &str) -> GateModel {
        self.gates
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.gate_id.as_str() == gate_id)
            .cloned()
            .unwrap()
    }

    pub fn principal(&self, id: Uuid) -> PrincipalModel {
        self.principals
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .unwrap()
    }

    fn check_lookup(&self) -> StoreResult<()> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err("store unreachable".into());
        }
        Ok(())
    }
}

#[async_trait]
impl FindGateByGateId for InMemoryStore {
    async fn find_by_gate_id(&self, gate_id: &str) -> StoreResult<Option<GateModel>> {
        self.check_lookup()?;
        Ok(self
            .gates
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.gate_id.as_str() == gate_id)
            .cloned())
    }
}

#[async_trait]
impl IncrementScanCount for InMemoryStore {
    async fn increment_scan_count(&self, gate_id: &str, scanned_at: DateTime<Utc>) -> StoreResult<bool> {
        let mut gates = self.gates.lock().unwrap();
        match gates.iter_mut().find(|g| g.gate_id.as_str() == gate_id) {
            Some(gate) => {
                gate.total_scans += 1;
                gate.last_scanned = Some(scanned_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl FindPrincipalByIdentityKey for InMemoryStore {
    async fn find_by_identity_key(&self, identity_key: &str) -> StoreResult<Option<PrincipalModel>> {
        self.check_lookup()?;
        Ok(self
            .principals
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.active && p.identity_key.as_str() == identity_key)
            .max_by_key(|p| p.updated_at)
            .cloned())
    }
}

#[async_trait]
impl AppendHistory for InMemoryStore {
    async fn append_history(&self, principal_id: Uuid, entry: &HistoryEntryModel) -> StoreResult<bool> {
        if self.drop_principal_before_append.load(Ordering::SeqCst) {
            self.principals.lock().unwrap().retain(|p| p.id != principal_id);
        }
        let mut principals = self.principals.lock().unwrap();
        let Some(principal) = principals.iter_mut().find(|p| p.id == principal_id) else {
            return Ok(false);
        };
        principal.last_access = Some(entry.timestamp);
        principal.last_gate_id = Some(HeaplessString::try_from(entry.gate_id.as_str()).unwrap());
        principal.last_gate_name = Some(HeaplessString::try_from(entry.gate_name.as_str()).unwrap());
        self.histories
            .lock()
            .unwrap()
            .entry(principal_id)
            .or_default()
            .push(entry.clone());
        Ok(true)
    }
}

#[async_trait]
impl LoadHistory for InMemoryStore {
    async fn load_history(&self, principal_id: Uuid, limit: usize) -> StoreResult<Option<Vec<HistoryEntryModel>>> {
        if !self.principals.lock().unwrap().iter().any(|p| p.id == principal_id) {
            return Ok(None);
        }
        let history = self.history_of(principal_id);
        let skip = history.len().saturating_sub(limit);
        Ok(Some(history.into_iter().skip(skip).collect()))
    }
}

#[async_trait]
impl CreateAccessLog for InMemoryStore {
    async fn create(&self, record: &AccessLogModel) -> StoreResult<AccessLogModel> {
        if self.fail_access_log_writes.load(Ordering::SeqCst) {
            return Err("access log store unavailable".into());
        }
        self.access_logs.lock().unwrap().push(record.clone());
        Ok(record.clone())
    }
}

#[async_trait]
impl LoadAccessLogs for InMemoryStore {
    async fn load_page(&self, filter: &AccessLogFilter, page: PageRequest) -> StoreResult<Page<AccessLogModel>> {
        let mut matching: Vec<AccessLogModel> = self
            .access_logs()
            .into_iter()
            .filter(|record| filter.matches(record))
            .collect();
        matching.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        let total = matching.len();
        let items = matching.into_iter().skip(page.offset).take(page.limit).collect();
        Ok(Page::new(items, total, page.limit, page.offset))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerMode {
    Confirming,
    Failing,
    Hanging,
}

/// Scripted ledger recording every submitted value.
pub struct FakeLedger {
    pub mode: LedgerMode,
    pub submissions: Mutex<Vec<u128>>,
}

impl FakeLedger {
    pub fn new(mode: LedgerMode) -> Arc<Self> {
        Arc::new(Self {
            mode,
            submissions: Mutex::new(Vec::new()),
        })
    }

    pub fn submissions(&self) -> Vec<u128> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl LedgerClient for FakeLedger {
    async fn submit(&self, value: u128) -> Result<String, LedgerError> {
        self.submissions.lock().unwrap().push(value);
        match self.mode {
            LedgerMode::Confirming => Ok(format!("0x{value:064x}")),
            LedgerMode::Failing => Err(LedgerError::Unavailable("connection refused".to_string())),
            LedgerMode::Hanging => {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok("0xlate".to_string())
            }
        }
    }

    async fn await_confirmation(&self, tx_hash: &str) -> Result<TxReceipt, LedgerError> {
        Ok(TxReceipt {
            tx_hash: tx_hash.to_string(),
            block_number: 42,
            success: true,
        })
    }

    async fn receipt(&self, tx_hash: &str) -> Result<Option<TxReceipt>, LedgerError> {
        match self.mode {
            LedgerMode::Confirming if tx_hash.starts_with("0x") => Ok(Some(TxReceipt {
                tx_hash: tx_hash.to_string(),
                block_number: 42,
                success: true,
            })),
            LedgerMode::Confirming => Ok(None),
            _ => Err(LedgerError::Unavailable("connection refused".to_string())),
        }
    }

    async fn chain_status(&self) -> Result<ChainStatus, LedgerError> {
        match self.mode {
            LedgerMode::Confirming => Ok(ChainStatus {
                chain_id: 1337,
                latest_block: 42,
                latency_ms: 1.5,
            }),
            _ => Err(LedgerError::Unavailable("connection refused".to_string())),
        }
    }
}

pub fn ledger_writer(ledger: &Arc<FakeLedger>) -> LedgerWriter {
    LedgerWriter::new(ledger.clone(), Duration::from_millis(100))
}

pub fn orchestrator(store: &Arc<InMemoryStore>, ledger: LedgerWriter) -> EventOrchestrator {
    EventOrchestrator::new(store.clone(), store.clone(), store.clone(), ledger)
}

pub fn gate(gate_id: &str, status: GateStatus, levels: &[&str]) -> GateModel {
    let now = Utc::now();
    GateModel {
        id: Uuid::new_v4(),
        gate_id: HeaplessString::try_from(gate_id).unwrap(),
        name: HeaplessString::try_from("Server Room").unwrap(),
        location: HeaplessString::try_from("Building A").unwrap(),
        status,
        permitted_access_levels: levels.iter().map(|l| l.to_string()).collect(),
        total_scans: 0,
        created_at: now,
        updated_at: now,
        last_scanned: None,
        last_restart: None,
    }
}

pub fn principal(name: &str, identity_key: &str, access_level: &str) -> PrincipalModel {
    let now = Utc::now();
    PrincipalModel {
        id: Uuid::new_v4(),
        identity_key: HeaplessString::try_from(identity_key).unwrap(),
        identity_key_hash: hash_as_i64(&identity_key).unwrap(),
        name: HeaplessString::try_from(name).unwrap(),
        email: Some(HeaplessString::try_from("jane.doe@example.com").unwrap()),
        position: Some(HeaplessString::try_from("Engineer").unwrap()),
        access_level: HeaplessString::try_from(access_level).unwrap(),
        active: true,
        last_access: None,
        last_gate_id: None,
        last_gate_name: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn scan(uid: &str, gate_id: &str) -> gate_access_api::ScanRequest {
    gate_access_api::ScanRequest {
        uid_hex: uid.to_string(),
        uid_length: Some(4),
        gate_id: Some(gate_id.to_string()),
    }
}

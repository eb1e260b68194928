//! Anchoring of scan events on an append-only ledger.
//!
//! `LedgerClient` is the capability the pipeline depends on; `JsonRpcLedgerClient`
//! talks to an Ethereum node hosting a storage contract. `LedgerWriter` wraps a
//! client with a single bounded attempt per event and never returns an error:
//! failures become `LedgerOutcome::Unavailable`.

pub mod json_rpc;
pub mod writer;

use async_trait::async_trait;
use thiserror::Error;

pub use json_rpc::{JsonRpcLedgerClient, JsonRpcLedgerConfig};
pub use writer::{LedgerOutcome, LedgerWriter};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("ledger node unreachable: {0}")]
    Unavailable(String),

    #[error("ledger call timed out after {0} ms")]
    Timeout(u64),

    #[error("ledger rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("transaction {0} reverted")]
    Rejected(String),

    #[error("ledger not configured: {0}")]
    NotConfigured(String),

    #[error("malformed ledger response: {0}")]
    Malformed(String),
}

/// Mined transaction as reported by the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub tx_hash: String,
    pub block_number: u64,
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChainStatus {
    pub chain_id: u64,
    pub latest_block: u64,
    pub latency_ms: f64,
}

#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Submits `value` to the contract and returns the transaction hash.
    async fn submit(&self, value: u128) -> Result<String, LedgerError>;

    /// Waits until the transaction is mined or the client's confirmation deadline passes.
    async fn await_confirmation(&self, tx_hash: &str) -> Result<TxReceipt, LedgerError>;

    /// Receipt lookup without waiting; `None` while pending or unknown.
    async fn receipt(&self, tx_hash: &str) -> Result<Option<TxReceipt>, LedgerError>;

    async fn chain_status(&self) -> Result<ChainStatus, LedgerError>;
}

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use super::{ChainStatus, LedgerClient, LedgerError, TxReceipt};

/// Selector of the storage contract's `set(uint256)`.
pub const SET_SELECTOR: &str = "0x60fe47b1";

#[derive(Debug, Clone)]
pub struct JsonRpcLedgerConfig {
    pub provider_url: String,
    pub contract_address: String,
    pub account_index: usize,
    /// Bound on each individual HTTP request
    pub request_timeout: Duration,
    pub poll_interval: Duration,
    /// Bound on waiting for a submitted transaction to be mined
    pub confirmation_timeout: Duration,
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcReceipt {
    transaction_hash: String,
    block_number: String,
    #[serde(default)]
    status: Option<String>,
}

/// Ledger client for an Ethereum node over JSON-RPC.
///
/// Transactions are sent from a node-managed account (`eth_accounts`), so the
/// node signs them; no key material is held here.
pub struct JsonRpcLedgerClient {
    http: reqwest::Client,
    config: JsonRpcLedgerConfig,
    next_id: AtomicU64,
}

impl JsonRpcLedgerClient {
    pub fn new(config: JsonRpcLedgerConfig) -> Result<Self, LedgerError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.request_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| LedgerError::NotConfigured(e.to_string()))?;
        Ok(Self {
            http,
            config,
            next_id: AtomicU64::new(1),
        })
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, LedgerError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        debug!(method, "ledger rpc call");

        let response = self
            .http
            .post(&self.config.provider_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        if !response.status().is_success() {
            return Err(LedgerError::Unavailable(format!(
                "{method} returned HTTP {}",
                response.status()
            )));
        }
        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| LedgerError::Malformed(e.to_string()))?;

        if let Some(error) = body.error {
            return Err(LedgerError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        Ok(body.result.unwrap_or(Value::Null))
    }

    fn transport_error(&self, error: reqwest::Error) -> LedgerError {
        if error.is_timeout() {
            LedgerError::Timeout(self.config.request_timeout.as_millis() as u64)
        } else {
            LedgerError::Unavailable(error.to_string())
        }
    }

    async fn poll_until_mined(&self, tx_hash: &str) -> Result<TxReceipt, LedgerError> {
        loop {
            if let Some(receipt) = self.receipt(tx_hash).await? {
                if !receipt.success {
                    return Err(LedgerError::Rejected(receipt.tx_hash));
                }
                return Ok(receipt);
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    async fn sender(&self) -> Result<String, LedgerError> {
        let accounts: Vec<String> = serde_json::from_value(self.call("eth_accounts", json!([])).await?)
            .map_err(|e| LedgerError::Malformed(e.to_string()))?;
        accounts
            .into_iter()
            .nth(self.config.account_index)
            .ok_or_else(|| {
                LedgerError::NotConfigured(format!(
                    "no node account at index {}",
                    self.config.account_index
                ))
            })
    }
}

/// Calldata for `set(uint256)` with `value` as the argument.
pub fn encode_set_call(value: u128) -> String {
    format!("{SET_SELECTOR}{value:064x}")
}

/// Parses a JSON-RPC hex quantity such as `0x1b4`.
pub fn parse_quantity(quantity: &str) -> Result<u64, LedgerError> {
    let digits = quantity
        .strip_prefix("0x")
        .ok_or_else(|| LedgerError::Malformed(format!("not a hex quantity: {quantity}")))?;
    u64::from_str_radix(digits, 16)
        .map_err(|_| LedgerError::Malformed(format!("not a hex quantity: {quantity}")))
}

fn parse_receipt(value: Value) -> Result<Option<TxReceipt>, LedgerError> {
    if value.is_null() {
        return Ok(None);
    }
    let receipt: RpcReceipt =
        serde_json::from_value(value).map_err(|e| LedgerError::Malformed(e.to_string()))?;
    Ok(Some(TxReceipt {
        tx_hash: receipt.transaction_hash,
        block_number: parse_quantity(&receipt.block_number)?,
        // pre-Byzantium receipts carry no status
        success: receipt.status.as_deref() != Some("0x0"),
    }))
}

#[async_trait]
impl LedgerClient for JsonRpcLedgerClient {
    async fn submit(&self, value: u128) -> Result<String, LedgerError> {
        let from = self.sender().await?;
        let params = json!([{
            "from": from,
            "to": self.config.contract_address,
            "data": encode_set_call(value),
        }]);
        let result = self.call("eth_sendTransaction", params).await?;
        result
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| LedgerError::Malformed("eth_sendTransaction returned no hash".to_string()))
    }

    async fn await_confirmation(&self, tx_hash: &str) -> Result<TxReceipt, LedgerError> {
        let deadline = self.config.confirmation_timeout;
        tokio::time::timeout(deadline, self.poll_until_mined(tx_hash))
            .await
            .map_err(|_| LedgerError::Timeout(deadline.as_millis() as u64))?
    }

    async fn receipt(&self, tx_hash: &str) -> Result<Option<TxReceipt>, LedgerError> {
        let result = self
            .call("eth_getTransactionReceipt", json!([tx_hash]))
            .await?;
        parse_receipt(result)
    }

    async fn chain_status(&self) -> Result<ChainStatus, LedgerError> {
        let started = Instant::now();
        let latest_block = self.call("eth_blockNumber", json!([])).await?;
        let latency_ms = started.elapsed().as_secs_f64() * 1_000.0;
        let chain_id = self.call("eth_chainId", json!([])).await?;

        let as_quantity = |value: Value| -> Result<u64, LedgerError> {
            value
                .as_str()
                .ok_or_else(|| LedgerError::Malformed(format!("expected hex quantity, got {value}")))
                .and_then(parse_quantity)
        };

        Ok(ChainStatus {
            chain_id: as_quantity(chain_id)?,
            latest_block: as_quantity(latest_block)?,
            latency_ms,
        })
    }
}

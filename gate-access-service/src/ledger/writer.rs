use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::{LedgerClient, LedgerError};

/// Reason reported when anchoring is switched off.
pub const LEDGER_DISABLED: &str = "ledger disabled";

/// Reason reported when the tag had no numeric identity to anchor.
pub const NO_DECODABLE_IDENTITY: &str = "no decodable identity";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerOutcome {
    /// `summary_digest` names the audited event the transaction stands for.
    Anchored { tx_hash: String, summary_digest: String },
    Unavailable { reason: String },
}

impl LedgerOutcome {
    pub fn tx_hash(&self) -> Option<&str> {
        match self {
            LedgerOutcome::Anchored { tx_hash, .. } => Some(tx_hash.as_str()),
            LedgerOutcome::Unavailable { .. } => None,
        }
    }

    pub fn summary_digest(&self) -> Option<&str> {
        match self {
            LedgerOutcome::Anchored { summary_digest, .. } => Some(summary_digest.as_str()),
            LedgerOutcome::Unavailable { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LedgerOutcome::Anchored { .. } => None,
            LedgerOutcome::Unavailable { reason } => Some(reason.as_str()),
        }
    }
}

/// One bounded anchor attempt per event.
#[derive(Clone)]
pub struct LedgerWriter {
    client: Option<Arc<dyn LedgerClient>>,
    timeout: Duration,
}

impl LedgerWriter {
    pub fn new(client: Arc<dyn LedgerClient>, timeout: Duration) -> Self {
        Self {
            client: Some(client),
            timeout,
        }
    }

    pub fn disabled() -> Self {
        Self {
            client: None,
            timeout: Duration::ZERO,
        }
    }

    pub fn client(&self) -> Option<&Arc<dyn LedgerClient>> {
        self.client.as_ref()
    }

    /// Anchors the canonical identity of the event summarized by `summary_digest`,
    /// submission and confirmation included, within the writer's timeout.
    /// A timeout is reported like a lost connection.
    pub async fn anchor(&self, identity: &str, summary_digest: &str) -> LedgerOutcome {
        let Some(client) = &self.client else {
            return LedgerOutcome::Unavailable {
                reason: LEDGER_DISABLED.to_string(),
            };
        };
        let Ok(value) = identity.parse::<u128>() else {
            return LedgerOutcome::Unavailable {
                reason: NO_DECODABLE_IDENTITY.to_string(),
            };
        };

        let attempt = async {
            let tx_hash = client.submit(value).await?;
            client.await_confirmation(&tx_hash).await
        };

        let result = match tokio::time::timeout(self.timeout, attempt).await {
            Ok(result) => result,
            Err(_) => Err(LedgerError::Timeout(self.timeout.as_millis() as u64)),
        };

        match result {
            Ok(receipt) => {
                info!(
                    tx_hash = %receipt.tx_hash,
                    block = receipt.block_number,
                    summary_digest,
                    "scan anchored"
                );
                LedgerOutcome::Anchored {
                    tx_hash: receipt.tx_hash,
                    summary_digest: summary_digest.to_string(),
                }
            }
            Err(e) => {
                warn!(error = %e, summary_digest, "ledger anchor failed");
                LedgerOutcome::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }
}

pub mod audit;
pub mod codec;
pub mod config;
pub mod event;
pub mod history;
pub mod http;
pub mod ledger;
pub mod orchestrator;
pub mod policy;
pub mod resolver;

pub use codec::{canonicalize, DecodedUid};
pub use config::{ConfigError, GateServiceConfig};
pub use ledger::{LedgerClient, LedgerError, LedgerOutcome, LedgerWriter};
pub use orchestrator::EventOrchestrator;
pub use policy::{evaluate, Decision};

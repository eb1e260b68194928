//! `gate-access` server: scan submissions from gate reader bridges.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use gate_access_postgres::repository::db_init::run_migrations;
use gate_access_postgres::PostgresRepositories;
use gate_access_service::config::GateServiceConfig;
use gate_access_service::http::{router, AppState};
use gate_access_service::ledger::{JsonRpcLedgerClient, JsonRpcLedgerConfig, LedgerWriter};
use gate_access_service::EventOrchestrator;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gate-access")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, env = "GATE_ACCESS_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, env = "GATE_ACCESS_BIND")]
    bind: Option<String>,

    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Ethereum JSON-RPC endpoint
    #[arg(long, env = "LEDGER_PROVIDER_URL")]
    ledger_url: Option<String>,

    /// Run without anchoring scans on the ledger
    #[arg(long)]
    no_ledger: bool,

    #[arg(long, env = "GATE_ACCESS_LOG_LEVEL")]
    log_level: Option<String>,
}

fn load_config(args: &Args) -> Result<GateServiceConfig> {
    let mut config = match &args.config {
        Some(path) => GateServiceConfig::from_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => GateServiceConfig::default(),
    };

    if let Some(bind) = &args.bind {
        config.server.bind = bind.clone();
    }
    if let Some(url) = &args.database_url {
        config.database.url = url.clone();
    }
    if let Some(url) = &args.ledger_url {
        config.ledger.provider_url = url.clone();
    }
    if args.no_ledger {
        config.ledger.enabled = false;
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn ledger_writer(config: &GateServiceConfig) -> Result<LedgerWriter> {
    if !config.ledger.enabled {
        warn!("ledger disabled, scans will not be anchored");
        return Ok(LedgerWriter::disabled());
    }
    let contract_address = config
        .ledger
        .resolve_contract_address()
        .context("failed to resolve the ledger contract address")?;
    let client = JsonRpcLedgerClient::new(JsonRpcLedgerConfig {
        provider_url: config.ledger.provider_url.clone(),
        contract_address,
        account_index: config.ledger.account_index,
        request_timeout: config.ledger.timeout(),
        poll_interval: config.ledger.poll_interval(),
        confirmation_timeout: config.ledger.timeout(),
    })
    .context("failed to build the ledger client")?;

    info!(provider = %config.ledger.provider_url, "ledger anchoring enabled");
    Ok(LedgerWriter::new(Arc::new(client), config.ledger.timeout()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await
        .context("failed to connect to the database")?;
    run_migrations(&pool)
        .await
        .context("failed to apply database migrations")?;

    let repos = PostgresRepositories::new(Arc::new(pool)).create_all_repositories();
    let orchestrator = EventOrchestrator::new(
        repos.gate_repository.clone(),
        repos.principal_repository.clone(),
        repos.access_log_repository.clone(),
        ledger_writer(&config)?,
    );
    let app = router(AppState {
        orchestrator,
        principals: repos.principal_repository,
        access_logs: repos.access_log_repository,
        history: config.history.clone(),
    });

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind))?;
    info!(bind = %config.server.bind, "gate-access listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

//! HTTP surface: scan submission plus read-only audit, history and ledger views.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use gate_access_api::{
    AccessError, AccessLogListResponse, AccessLogQuery, HistoryQuery, HistoryResponse,
    LedgerStatusResponse, ScanRequest, ScanResponse, TransactionVerification,
};
use gate_access_db::models::access_log::AccessLogModel;
use gate_access_db::models::history::HistoryEntryModel;
use gate_access_db::repository::{AccessLogFilter, AccessLogRepository, PageRequest, PrincipalRepository};
use serde_json::json;
use tracing::{error, warn};
use uuid::Uuid;

use crate::config::HistoryConfig;
use crate::ledger::writer::LEDGER_DISABLED;
use crate::ledger::LedgerClient;
use crate::orchestrator::EventOrchestrator;

pub const DEFAULT_PER_PAGE: usize = 5;
pub const MAX_PER_PAGE: usize = 100;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: EventOrchestrator,
    pub principals: Arc<dyn PrincipalRepository>,
    pub access_logs: Arc<dyn AccessLogRepository>,
    pub history: HistoryConfig,
}

/// `AccessError` rendered as a JSON error response.
#[derive(Debug)]
pub struct ApiError(pub AccessError);

impl From<AccessError> for ApiError {
    fn from(error: AccessError) -> Self {
        ApiError(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.0.to_body())).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/access", post(submit_scan))
        .route("/api/logs", get(list_access_logs))
        .route("/api/principals/:id/history", get(principal_history))
        .route("/api/ledger/status", get(ledger_status))
        .route("/api/ledger/transactions/:tx_hash", get(verify_transaction))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn submit_scan(
    State(state): State<AppState>,
    payload: Result<Json<ScanRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ScanResponse>), ApiError> {
    let Json(request) = payload.map_err(|e| AccessError::MalformedInput(e.body_text()))?;
    let response = state.orchestrator.process(request).await?;
    let status = StatusCode::from_u16(response.status_code()).unwrap_or(StatusCode::OK);
    Ok((status, Json(response)))
}

/// Validates the listing query into a filter and a page request.
pub fn access_log_page(query: &AccessLogQuery) -> Result<(AccessLogFilter, PageRequest), AccessError> {
    let page = query.page.unwrap_or(1);
    let per_page = query.per_page.unwrap_or(DEFAULT_PER_PAGE);
    if page == 0 || per_page == 0 || per_page > MAX_PER_PAGE {
        return Err(AccessError::MalformedInput(format!(
            "page must be at least 1 and per_page between 1 and {MAX_PER_PAGE}"
        )));
    }
    if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
        if start > end {
            return Err(AccessError::MalformedInput(
                "start_date must not be after end_date".to_string(),
            ));
        }
    }

    let filter = AccessLogFilter {
        access_status: query.status,
        identity_key: query.identity_key.clone(),
        start_date: query.start_date,
        end_date: query.end_date,
    };
    let page_request = PageRequest::try_for_page(per_page, page)
        .ok_or_else(|| AccessError::MalformedInput(format!("page {page} is out of range")))?;
    Ok((filter, page_request))
}

async fn list_access_logs(
    State(state): State<AppState>,
    query: Result<Query<AccessLogQuery>, QueryRejection>,
) -> Result<Json<AccessLogListResponse<AccessLogModel>>, ApiError> {
    let Query(query) = query.map_err(|e| AccessError::MalformedInput(e.body_text()))?;
    let (filter, page_request) = access_log_page(&query)?;

    let page = state
        .access_logs
        .load_page(&filter, page_request)
        .await
        .map_err(|e| {
            error!(error = %e, "failed to load access logs");
            AccessError::Internal(format!("failed to load access logs: {e}"))
        })?;

    let pagination = page.meta();
    Ok(Json(AccessLogListResponse {
        logs: page.items,
        pagination,
    }))
}

async fn principal_history(
    State(state): State<AppState>,
    Path(principal_id): Path<Uuid>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<HistoryResponse<HistoryEntryModel>>, ApiError> {
    let Query(query) = query.map_err(|e| AccessError::MalformedInput(e.body_text()))?;
    let limit = state.history.effective_limit(query.limit);

    let entries = state
        .principals
        .load_history(principal_id, limit)
        .await
        .map_err(|e| {
            error!(%principal_id, error = %e, "failed to load history");
            AccessError::Internal(format!("failed to load history: {e}"))
        })?
        .ok_or_else(|| AccessError::NotFound(format!("principal {principal_id}")))?;

    Ok(Json(HistoryResponse {
        principal_id,
        limit,
        entries,
    }))
}

fn ledger_client(state: &AppState) -> Result<Arc<dyn LedgerClient>, AccessError> {
    state
        .orchestrator
        .ledger()
        .client()
        .cloned()
        .ok_or_else(|| AccessError::LedgerUnavailable(LEDGER_DISABLED.to_string()))
}

async fn ledger_status(State(state): State<AppState>) -> Result<Json<LedgerStatusResponse>, ApiError> {
    let client = ledger_client(&state)?;
    let status = client.chain_status().await.map_err(|e| {
        warn!(error = %e, "ledger status unavailable");
        AccessError::LedgerUnavailable(e.to_string())
    })?;

    Ok(Json(LedgerStatusResponse {
        status: "connected".to_string(),
        latency_ms: status.latency_ms,
        chain_id: status.chain_id,
        latest_block: status.latest_block,
    }))
}

async fn verify_transaction(
    State(state): State<AppState>,
    Path(tx_hash): Path<String>,
) -> Result<Json<TransactionVerification>, ApiError> {
    let client = ledger_client(&state)?;
    let receipt = client.receipt(&tx_hash).await.map_err(|e| {
        warn!(%tx_hash, error = %e, "transaction lookup failed");
        AccessError::LedgerUnavailable(e.to_string())
    })?;

    Ok(Json(TransactionVerification {
        found: receipt.is_some(),
        block_number: receipt.as_ref().map(|r| r.block_number),
        success: receipt.as_ref().map(|r| r.success),
        tx_hash,
    }))
}

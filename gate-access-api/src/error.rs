use serde::Serialize;
use thiserror::Error;

/// Failures surfaced to the scanner bridge or an operator.
///
/// Side-effect failures of the scan pipeline (ledger, history) never appear
/// here: they are recovered inside the pipeline and reported as flags on the
/// response payload instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Gate not found: {0}")]
    GateNotFound(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Ledger unavailable: {0}")]
    LedgerUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccessError {
    /// HTTP status code the error maps to.
    pub fn status_code(&self) -> u16 {
        match self {
            AccessError::MalformedInput(_) => 400,
            AccessError::GateNotFound(_) | AccessError::NotFound(_) => 404,
            AccessError::LedgerUnavailable(_) => 503,
            AccessError::Internal(_) => 500,
        }
    }

    /// Short caller-facing summary; the variant payload goes into `details`.
    pub fn summary(&self) -> &'static str {
        match self {
            AccessError::MalformedInput(_) => "Invalid request",
            AccessError::GateNotFound(_) => "Device not found",
            AccessError::NotFound(_) => "Resource not found",
            AccessError::LedgerUnavailable(_) => "Failed to connect to the blockchain node",
            AccessError::Internal(_) => "Failed to process request",
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        let details = match self {
            AccessError::MalformedInput(d)
            | AccessError::GateNotFound(d)
            | AccessError::NotFound(d)
            | AccessError::LedgerUnavailable(d)
            | AccessError::Internal(d) => d.clone(),
        };
        ErrorBody {
            error: self.summary().to_string(),
            details: Some(details),
        }
    }
}

impl From<validator::ValidationErrors> for AccessError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AccessError::MalformedInput(errors.to_string())
    }
}

/// JSON body returned with every non-2xx response.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

pub type ApiResult<T> = Result<T, AccessError>;

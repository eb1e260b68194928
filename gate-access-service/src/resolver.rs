use std::sync::Arc;

use gate_access_api::AccessError;
use gate_access_db::models::gate::GateModel;
use gate_access_db::models::principal::PrincipalModel;
use gate_access_db::repository::{GateRepository, PrincipalRepository};
use tracing::error;

/// Looks gates up by their device identifier.
#[derive(Clone)]
pub struct GateResolver {
    gates: Arc<dyn GateRepository>,
}

impl GateResolver {
    pub fn new(gates: Arc<dyn GateRepository>) -> Self {
        Self { gates }
    }

    /// `Ok(None)` when no gate has this id.
    pub async fn resolve(&self, gate_id: &str) -> Result<Option<GateModel>, AccessError> {
        self.gates.find_by_gate_id(gate_id).await.map_err(|e| {
            error!(gate_id, error = %e, "gate lookup failed");
            AccessError::Internal(format!("gate lookup failed: {e}"))
        })
    }
}

/// Maps a canonical identity to the principal holding that tag.
#[derive(Clone)]
pub struct IdentityResolver {
    principals: Arc<dyn PrincipalRepository>,
}

impl IdentityResolver {
    pub fn new(principals: Arc<dyn PrincipalRepository>) -> Self {
        Self { principals }
    }

    /// An undecodable tag, an unregistered identity and an inactive principal
    /// all resolve to `Ok(None)`.
    pub async fn resolve(&self, identity: Option<&str>) -> Result<Option<PrincipalModel>, AccessError> {
        let Some(identity) = identity else {
            return Ok(None);
        };
        let principal = self
            .principals
            .find_by_identity_key(identity)
            .await
            .map_err(|e| {
                error!(identity, error = %e, "identity lookup failed");
                AccessError::Internal(format!("identity lookup failed: {e}"))
            })?;
        Ok(principal.filter(|p| p.active))
    }
}

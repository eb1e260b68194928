use async_trait::async_trait;

use crate::models::gate::GateModel;

/// Repository trait for resolving a gate from the hardware identifier its
/// reader reports with every scan.
///
/// # Example
/// ```ignore
/// impl FindGateByGateId for GateRepositoryImpl {
///     async fn find_by_gate_id(&self, gate_id: &str) -> Result<Option<GateModel>, Box<dyn Error + Send + Sync>> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait FindGateByGateId: Send + Sync {
    /// Find a gate by its hardware identifier
    ///
    /// # Arguments
    /// * `gate_id` - The identifier reported by the reader bridge
    ///
    /// # Returns
    /// * `Ok(Some(GateModel))` - The gate, whatever its lifecycle status
    /// * `Ok(None)` - If no gate is registered under this identifier
    /// * `Err` - An error if the query could not be executed
    async fn find_by_gate_id(
        &self,
        gate_id: &str,
    ) -> Result<Option<GateModel>, Box<dyn std::error::Error + Send + Sync>>;
}

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::history::HistoryEntryModel;

/// Repository trait for appending to a principal's access history.
///
/// The append and the last-access snapshot (`last_access`, `last_gate_id`,
/// `last_gate_name`, taken from the entry) are applied in a single atomic
/// update. A principal without a history gets a one-element history.
#[async_trait]
pub trait AppendHistory: Send + Sync {
    /// Append one entry to the principal's history
    ///
    /// # Returns
    /// * `Ok(true)` - The entry was appended
    /// * `Ok(false)` - The principal no longer exists
    /// * `Err` - An error if the update could not be executed
    async fn append_history(
        &self,
        principal_id: Uuid,
        entry: &HistoryEntryModel,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;
}

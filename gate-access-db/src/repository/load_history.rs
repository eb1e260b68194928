use async_trait::async_trait;
use uuid::Uuid;

use crate::models::history::HistoryEntryModel;

/// Repository trait for the bounded view over a principal's history.
#[async_trait]
pub trait LoadHistory: Send + Sync {
    /// Load the most recent `limit` entries, oldest first
    ///
    /// # Returns
    /// * `Ok(Some(entries))` - Up to `limit` entries in arrival order
    /// * `Ok(None)` - If the principal does not exist
    /// * `Err` - An error if the query could not be executed
    async fn load_history(
        &self,
        principal_id: Uuid,
        limit: usize,
    ) -> Result<Option<Vec<HistoryEntryModel>>, Box<dyn std::error::Error + Send + Sync>>;
}

use async_trait::async_trait;

use crate::models::access_log::AccessLogModel;

/// Repository trait for inserting access log records.
///
/// Records are insert-only: there is deliberately no update or delete
/// counterpart for the access log.
#[async_trait]
pub trait CreateAccessLog: Send + Sync {
    /// Insert one record
    ///
    /// # Returns
    /// * `Ok(AccessLogModel)` - The stored record
    /// * `Err` - An error if the insert could not be executed
    async fn create(
        &self,
        record: &AccessLogModel,
    ) -> Result<AccessLogModel, Box<dyn std::error::Error + Send + Sync>>;
}

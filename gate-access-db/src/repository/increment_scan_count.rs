use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository trait for bumping a gate's scan counter.
///
/// Implementations must perform the increment in the store itself
/// (increment-in-place), never as read-modify-write, so that concurrent scans
/// at the same gate cannot lose updates.
#[async_trait]
pub trait IncrementScanCount: Send + Sync {
    /// Increment `total_scans` by one and set `last_scanned`
    ///
    /// # Arguments
    /// * `gate_id` - The hardware identifier of the gate
    /// * `scanned_at` - Arrival time of the scan
    ///
    /// # Returns
    /// * `Ok(true)` - The counter was incremented
    /// * `Ok(false)` - No gate matched the identifier
    /// * `Err` - An error if the update could not be executed
    async fn increment_scan_count(
        &self,
        gate_id: &str,
        scanned_at: DateTime<Utc>,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;
}

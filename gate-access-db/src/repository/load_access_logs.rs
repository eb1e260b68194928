use async_trait::async_trait;
use chrono::NaiveDate;
use gate_access_api::AccessStatus;

use crate::models::access_log::AccessLogModel;
use crate::repository::pagination::{Page, PageRequest};

/// Filter applied to the access log listing. `None` fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessLogFilter {
    pub access_status: Option<AccessStatus>,
    pub identity_key: Option<String>,
    /// Inclusive lower bound on the event date
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on the event date
    pub end_date: Option<NaiveDate>,
}

impl AccessLogFilter {
    pub fn matches(&self, record: &AccessLogModel) -> bool {
        if let Some(status) = self.access_status {
            if record.access_status != status {
                return false;
            }
        }
        if let Some(key) = &self.identity_key {
            if record.nfc_id.as_ref().map(|k| k.as_str()) != Some(key.as_str()) {
                return false;
            }
        }
        let date = record.timestamp.date_naive();
        if matches!(self.start_date, Some(start) if date < start) {
            return false;
        }
        if matches!(self.end_date, Some(end) if date > end) {
            return false;
        }
        true
    }
}

/// Repository trait for paging through the access log, newest first.
///
/// # Example
/// ```ignore
/// let page = repo.load_page(&AccessLogFilter::default(), PageRequest::for_page(5, 1)).await?;
/// println!("Page {} of {}", page.page_number(), page.total_pages());
/// ```
#[async_trait]
pub trait LoadAccessLogs: Send + Sync {
    async fn load_page(
        &self,
        filter: &AccessLogFilter,
        page: PageRequest,
    ) -> Result<Page<AccessLogModel>, Box<dyn std::error::Error + Send + Sync>>;
}

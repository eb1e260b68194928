use async_trait::async_trait;
use gate_access_db::models::access_log::AccessLogModel;
use gate_access_db::repository::load_access_logs::{AccessLogFilter, LoadAccessLogs};
use gate_access_db::repository::pagination::{Page, PageRequest};
use crate::utils::TryFromRow;
use sqlx::{Postgres, QueryBuilder};
use std::error::Error;

use super::repo_impl::AccessLogRepositoryImpl;

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &AccessLogFilter) {
    builder.push(" WHERE TRUE");
    if let Some(status) = filter.access_status {
        builder.push(" AND access_status = ").push_bind(status);
    }
    if let Some(identity_key) = &filter.identity_key {
        builder.push(" AND nfc_id = ").push_bind(identity_key.clone());
    }
    // access_date is stored as YYYY-MM-DD, so lexical comparison is date order
    if let Some(start) = filter.start_date {
        builder
            .push(" AND access_date >= ")
            .push_bind(start.format("%Y-%m-%d").to_string());
    }
    if let Some(end) = filter.end_date {
        builder
            .push(" AND access_date <= ")
            .push_bind(end.format("%Y-%m-%d").to_string());
    }
}

impl AccessLogRepositoryImpl {
    pub(super) async fn load_page_impl(
        repo: &AccessLogRepositoryImpl,
        filter: &AccessLogFilter,
        page: PageRequest,
    ) -> Result<Page<AccessLogModel>, Box<dyn Error + Send + Sync>> {
        let mut count_builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM access_log");
        push_filters(&mut count_builder, filter);
        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&*repo.pool)
            .await?;

        let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM access_log");
        push_filters(&mut builder, filter);
        builder
            .push(" ORDER BY event_timestamp DESC LIMIT ")
            .push_bind(page.limit as i64)
            .push(" OFFSET ")
            .push_bind(page.offset as i64);

        let rows = builder.build().fetch_all(&*repo.pool).await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(AccessLogModel::try_from_row(&row)?);
        }

        Ok(Page::new(items, total as usize, page.limit, page.offset))
    }
}

#[async_trait]
impl LoadAccessLogs for AccessLogRepositoryImpl {
    async fn load_page(
        &self,
        filter: &AccessLogFilter,
        page: PageRequest,
    ) -> Result<Page<AccessLogModel>, Box<dyn Error + Send + Sync>> {
        Self::load_page_impl(self, filter, page).await
    }
}

use gate_access_db::models::gate::GateModel;
use crate::utils::{get_heapless_string, TryFromRow};
use sqlx::{postgres::PgRow, PgPool, Row};
use std::error::Error;
use std::sync::Arc;

pub struct GateRepositoryImpl {
    pub(crate) pool: Arc<PgPool>,
}

impl GateRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for GateModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(GateModel {
            id: row.try_get("id")?,
            gate_id: get_heapless_string(row, "gate_id")?,
            name: get_heapless_string(row, "name")?,
            location: get_heapless_string(row, "location")?,
            status: row.try_get("status")?,
            permitted_access_levels: row.try_get("permitted_access_levels")?,
            total_scans: row.try_get("total_scans")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            last_scanned: row.try_get("last_scanned")?,
            last_restart: row.try_get("last_restart")?,
        })
    }
}

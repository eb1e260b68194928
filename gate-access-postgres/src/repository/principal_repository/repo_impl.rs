use gate_access_db::models::principal::PrincipalModel;
use crate::utils::{get_heapless_string, get_optional_heapless_string, TryFromRow};
use sqlx::{postgres::PgRow, PgPool, Row};
use std::error::Error;
use std::sync::Arc;

pub struct PrincipalRepositoryImpl {
    pub(crate) pool: Arc<PgPool>,
}

impl PrincipalRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for PrincipalModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(PrincipalModel {
            id: row.try_get("id")?,
            identity_key: get_heapless_string(row, "identity_key")?,
            identity_key_hash: row.try_get("identity_key_hash")?,
            name: get_heapless_string(row, "name")?,
            email: get_optional_heapless_string(row, "email")?,
            position: get_optional_heapless_string(row, "position")?,
            access_level: get_heapless_string(row, "access_level")?,
            active: row.try_get("active")?,
            last_access: row.try_get("last_access")?,
            last_gate_id: get_optional_heapless_string(row, "last_gate_id")?,
            last_gate_name: get_optional_heapless_string(row, "last_gate_name")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

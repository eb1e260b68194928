use chrono::Utc;
use gate_access_db::models::gate::{GateModel, GateStatus};
use heapless::String as HeaplessString;
use sqlx::PgPool;
use uuid::Uuid;

pub fn create_test_gate(gate_id: &str, status: GateStatus, levels: &[&str]) -> GateModel {
    let now = Utc::now();
    GateModel {
        id: Uuid::new_v4(),
        gate_id: HeaplessString::try_from(gate_id).unwrap(),
        name: HeaplessString::try_from("Server Room").unwrap(),
        location: HeaplessString::try_from("Building A, Floor 2").unwrap(),
        status,
        permitted_access_levels: levels.iter().map(|l| l.to_string()).collect(),
        total_scans: 0,
        created_at: now,
        updated_at: now,
        last_scanned: None,
        last_restart: Some(now),
    }
}

/// Gates are provisioned by the administration console; tests insert them directly.
pub async fn insert_test_gate(
    pool: &PgPool,
    gate: &GateModel,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    sqlx::query(
        r#"
        INSERT INTO gate (id, gate_id, name, location, status, permitted_access_levels,
                          total_scans, created_at, updated_at, last_scanned, last_restart)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        "#,
    )
    .bind(gate.id)
    .bind(gate.gate_id.as_str())
    .bind(gate.name.as_str())
    .bind(gate.location.as_str())
    .bind(gate.status)
    .bind(&gate.permitted_access_levels)
    .bind(gate.total_scans)
    .bind(gate.created_at)
    .bind(gate.updated_at)
    .bind(gate.last_scanned)
    .bind(gate.last_restart)
    .execute(pool)
    .await?;
    Ok(())
}

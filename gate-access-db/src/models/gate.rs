use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use uuid::Uuid;

/// Lifecycle status of a gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "gate_status", rename_all = "PascalCase")]
pub enum GateStatus {
    Active,
    Inactive,
    Maintenance,
}

impl std::fmt::Display for GateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GateStatus::Active => write!(f, "Active"),
            GateStatus::Inactive => write!(f, "Inactive"),
            GateStatus::Maintenance => write!(f, "Maintenance"),
        }
    }
}

impl FromStr for GateStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(GateStatus::Active),
            "Inactive" => Ok(GateStatus::Inactive),
            "Maintenance" => Ok(GateStatus::Maintenance),
            _ => Err(()),
        }
    }
}

pub fn serialize_gate_status<S>(value: &GateStatus, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_string())
}

pub fn deserialize_gate_status<'de, D>(deserializer: D) -> Result<GateStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let value_str = String::deserialize(deserializer)?;
    GateStatus::from_str(&value_str)
        .map_err(|_| serde::de::Error::custom(format!("Invalid GateStatus: {value_str}")))
}

/// # Documentation
/// A controlled access point fitted with a tag reader.
///
/// Gates are provisioned by the administration console. The scan pipeline
/// only reads them, except for `total_scans` and `last_scanned` which are
/// bumped in place on every audited scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateModel {
    pub id: Uuid,

    /// Hardware identifier reported by the reader bridge with every scan
    pub gate_id: HeaplessString<50>,

    pub name: HeaplessString<100>,
    pub location: HeaplessString<100>,

    #[serde(
        serialize_with = "serialize_gate_status",
        deserialize_with = "deserialize_gate_status"
    )]
    pub status: GateStatus,

    /// Access-level labels allowed through this gate
    pub permitted_access_levels: Vec<String>,

    pub total_scans: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_scanned: Option<DateTime<Utc>>,
    pub last_restart: Option<DateTime<Utc>>,
}

impl GateModel {
    pub fn is_active(&self) -> bool {
        self.status == GateStatus::Active
    }

    pub fn permits(&self, access_level: &str) -> bool {
        self.permitted_access_levels
            .iter()
            .any(|level| level == access_level)
    }
}

//! Floor Table Model

use serde::{Deserialize, Serialize};
use shared::TableStatus;
use surrealdb::RecordId;

use super::serde_helpers;

/// Physical table on the restaurant floor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorTable {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Display number, e.g. "A5"
    pub table_number: String,
    #[serde(default = "default_seats")]
    pub seats: i32,
    #[serde(default)]
    pub status: TableStatus,
}

fn default_seats() -> i32 {
    4
}

/// Create floor table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorTableCreate {
    pub table_number: String,
    pub seats: Option<i32>,
}

/// Update floor table payload
///
/// `status` here is the staff escape hatch: a manual edit bypasses the
/// order-driven state machine and may desynchronize status from the
/// outstanding-order count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorTableUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seats: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TableStatus>,
}

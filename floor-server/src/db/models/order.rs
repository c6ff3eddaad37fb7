//! Order Model
//!
//! One order is one "round": a single cart submission against a table.
//! A table typically accumulates several rounds before settlement marks
//! them all paid in one payment event. Paid orders are permanent sales
//! records and are never deleted.

use serde::{Deserialize, Serialize};
use shared::{OrderLine, OrderStatus, PaymentMethod};
use surrealdb::RecordId;

use super::serde_helpers;

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Table reference in string form ("floor_table:key"); kept addressable
    /// even after the table itself is deleted
    pub table_id: String,
    /// Table number snapshot at submission time
    pub table_number: String,
    /// Lines in submission order, no duplicate menu_item_id entries
    pub items: Vec<OrderLine>,
    /// Sum of line price x quantity, computed at submission, never edited
    pub total: f64,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    /// Settlement time, Unix millis; set together with status = PAID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<i64>,
    /// Submission time, Unix millis
    pub created_at: i64,
}

impl Order {
    /// String record id, empty when not yet persisted
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|id| id.to_string()).unwrap_or_default()
    }
}

//! Floor event vocabulary
//!
//! Mutations in the order flow publish these on the server's broadcast bus;
//! rendering layers subscribe instead of polling.

use serde::{Deserialize, Serialize};

use crate::models::TableStatus;
use crate::order::PaymentMethod;

/// Event published after a state-changing floor operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FloorEvent {
    /// A cart was submitted as a new pending order
    OrderPlaced {
        table_id: String,
        order_id: String,
        total: f64,
    },
    /// All outstanding orders for the table were marked paid
    OrderSettled {
        table_id: String,
        order_ids: Vec<String>,
        payment_method: PaymentMethod,
        grand_total: f64,
    },
    /// Table status changed (order-driven or manual staff edit)
    TableStatusChanged {
        table_id: String,
        status: TableStatus,
    },
}

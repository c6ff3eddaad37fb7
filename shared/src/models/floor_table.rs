//! Floor Table Model

use serde::{Deserialize, Serialize};

/// Occupancy state of a physical table
///
/// `EMPTY → OCCUPIED` on first order submission; `AWAITING_PAYMENT` is a
/// staff-set intermediate state; settlement frees the table back to `EMPTY`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    #[default]
    Empty,
    Occupied,
    AwaitingPayment,
}

impl TableStatus {
    /// Wire form, matches the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TableStatus::Empty => "EMPTY",
            TableStatus::Occupied => "OCCUPIED",
            TableStatus::AwaitingPayment => "AWAITING_PAYMENT",
        }
    }
}

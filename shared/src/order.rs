//! Order wire types
//!
//! `OrderLine` is embedded in the order document, not a standalone entity:
//! price and name are copied from the catalog when the line is added, so
//! later menu edits never rewrite history.

use serde::{Deserialize, Serialize};

/// Order status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
}

/// Payment method label (no processor integration)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Transfer,
}

/// One line of an order, snapshotted from the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    /// Menu item reference (string record id)
    pub menu_item_id: String,
    /// Name snapshot
    pub name: String,
    /// Unit price snapshot in currency unit
    pub price: f64,
    pub quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Cart line as submitted by a terminal; price/name are resolved
/// server-side from the catalog, never trusted from the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineInput {
    pub menu_item_id: String,
    pub quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

//! Daily Sales Summary Model

use serde::{Deserialize, Serialize};

/// Revenue split by payment method
///
/// Only the recognized methods get a bucket; orders carrying anything else
/// (legacy data) are excluded from both.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PaymentMethodTotals {
    pub cash: f64,
    pub transfer: f64,
}

/// Per-item sales accumulation, keyed by item name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemSales {
    pub name: String,
    pub quantity: i32,
    pub revenue: f64,
}

/// Revenue for one hour of the business day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HourlyBucket {
    /// Hour of day in the business timezone (0-23)
    pub hour: u32,
    pub amount: f64,
    pub count: i32,
}

/// Daily sales summary - pure projection over the day's settled orders
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailySales {
    /// Business date (YYYY-MM-DD format)
    pub date: String,
    pub total_revenue: f64,
    pub order_count: i32,
    pub by_payment_method: PaymentMethodTotals,
    /// Top sellers by revenue, descending, at most 10
    #[serde(default)]
    pub top_selling_items: Vec<ItemSales>,
    /// Hours with at least one settled order, ascending; empty hours omitted
    #[serde(default)]
    pub hourly_revenue: Vec<HourlyBucket>,
}

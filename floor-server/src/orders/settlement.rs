//! Settlement engine
//!
//! Merges every outstanding round for a table into one bill and marks
//! them paid in a single payment event. The store gives no multi-document
//! transaction, so the per-order update loop is re-entrant instead: an
//! already-paid order is a no-op on retry, and the table is only freed
//! after the whole loop has succeeded.

use serde::Serialize;
use shared::{FloorEvent, OrderLine, PaymentMethod, TableStatus, util::now_millis};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::error::{FlowError, FlowResult};
use super::money;
use crate::core::FloorEvents;
use crate::db::models::Order;
use crate::db::repository::{FloorTableRepository, OrderRepository};

/// Consolidated bill for one table
#[derive(Debug, Clone, Serialize)]
pub struct TableBill {
    pub table_id: String,
    pub table_number: String,
    /// Ids of the outstanding rounds, oldest first
    pub order_ids: Vec<String>,
    /// Lines merged across rounds by menu item
    pub lines: Vec<OrderLine>,
    /// Authoritative amount owed: the sum of the round totals
    pub grand_total: f64,
}

/// Merge lines from consecutive rounds into one consolidated list
///
/// Grouped by `menu_item_id` with quantities summed. When the catalog
/// changed between rounds the snapshots may disagree on price; the
/// first-seen price is kept as-is. The merged list is for display and
/// receipts only, never the source of the amount owed.
pub fn consolidate_lines(orders: &[Order]) -> Vec<OrderLine> {
    let mut merged: Vec<OrderLine> = Vec::new();
    for order in orders {
        for item in &order.items {
            match merged
                .iter_mut()
                .find(|line| line.menu_item_id == item.menu_item_id)
            {
                Some(line) => line.quantity += item.quantity,
                None => merged.push(item.clone()),
            }
        }
    }
    merged
}

/// Amount owed across rounds: the sum of stored order totals
///
/// Deliberately NOT recomputed from the merged line list, so that merge
/// behavior (first-seen price) can never drift from what each round
/// actually recorded.
pub fn grand_total(orders: &[Order]) -> f64 {
    money::to_amount(orders.iter().map(|order| money::dec(order.total)).sum())
}

pub struct SettlementEngine {
    tables: FloorTableRepository,
    orders: OrderRepository,
    events: FloorEvents,
}

impl SettlementEngine {
    pub fn new(db: Surreal<Db>, events: FloorEvents) -> Self {
        Self {
            tables: FloorTableRepository::new(db.clone()),
            orders: OrderRepository::new(db),
            events,
        }
    }

    /// Outstanding rounds for a table, oldest first
    pub async fn outstanding(&self, table_id: &str) -> FlowResult<Vec<Order>> {
        Ok(self.orders.find_outstanding_by_table(table_id).await?)
    }

    /// Compute the consolidated bill; pure read, valid as a print preview
    /// for an unpaid table
    pub async fn compute_bill(&self, table_id: &str) -> FlowResult<TableBill> {
        let table = self
            .tables
            .find_by_id(table_id)
            .await?
            .ok_or_else(|| FlowError::TableNotFound(table_id.to_string()))?;
        let outstanding = self.outstanding(table_id).await?;

        Ok(TableBill {
            table_id: table_id.to_string(),
            table_number: table.table_number,
            order_ids: outstanding.iter().map(|o| o.id_string()).collect(),
            lines: consolidate_lines(&outstanding),
            grand_total: grand_total(&outstanding),
        })
    }

    /// Mark every outstanding round paid and free the table
    ///
    /// Fails before any mutation when nothing is owed. On a partial
    /// failure the table keeps its status; a retried call re-fetches the
    /// now-smaller outstanding set and continues where the loop stopped.
    pub async fn settle(&self, table_id: &str, method: PaymentMethod) -> FlowResult<TableBill> {
        let table = self
            .tables
            .find_by_id(table_id)
            .await?
            .ok_or_else(|| FlowError::TableNotFound(table_id.to_string()))?;

        let outstanding = self.outstanding(table_id).await?;
        if outstanding.is_empty() {
            return Err(FlowError::NoOutstandingOrders(table_id.to_string()));
        }

        let bill = TableBill {
            table_id: table_id.to_string(),
            table_number: table.table_number,
            order_ids: outstanding.iter().map(|o| o.id_string()).collect(),
            lines: consolidate_lines(&outstanding),
            grand_total: grand_total(&outstanding),
        };

        let paid_date = now_millis();
        for order in &outstanding {
            let updated = self
                .orders
                .mark_paid(&order.id_string(), method, paid_date)
                .await?;
            if !updated {
                // Raced with a retry that already settled this round
                tracing::debug!(order_id = %order.id_string(), "Order already paid, skipping");
            }
        }

        // Only after every round is acknowledged paid
        self.tables
            .update_status(table_id, TableStatus::Empty)
            .await?;

        tracing::info!(
            table_id = %table_id,
            orders = bill.order_ids.len(),
            grand_total = bill.grand_total,
            method = ?method,
            "Table settled"
        );
        self.events.publish(FloorEvent::TableStatusChanged {
            table_id: table_id.to_string(),
            status: TableStatus::Empty,
        });
        self.events.publish(FloorEvent::OrderSettled {
            table_id: table_id.to_string(),
            order_ids: bill.order_ids.clone(),
            payment_method: method,
            grand_total: bill.grand_total,
        });

        Ok(bill)
    }
}

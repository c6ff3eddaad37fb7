//! Order Repository

use shared::PaymentMethod;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::Order;

const TABLE: &str = "food_order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a new order
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let thing = parse_id(id)?;
        let order: Option<Order> = self.base.db().select(thing).await?;
        Ok(order)
    }

    /// All orders for a table, oldest round first
    pub async fn find_by_table(&self, table_id: &str) -> RepoResult<Vec<Order>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM food_order WHERE table_id = $table_id ORDER BY created_at ASC",
            )
            .bind(("table_id", table_id.to_string()))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders)
    }

    /// Outstanding (not yet paid) orders for a table, oldest round first
    ///
    /// Creation order is the round order on the receipt.
    pub async fn find_outstanding_by_table(&self, table_id: &str) -> RepoResult<Vec<Order>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM food_order \
                 WHERE table_id = $table_id AND status != 'PAID' \
                 ORDER BY created_at ASC",
            )
            .bind(("table_id", table_id.to_string()))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders)
    }

    /// Number of outstanding orders for a table
    pub async fn count_outstanding_by_table(&self, table_id: &str) -> RepoResult<usize> {
        Ok(self.find_outstanding_by_table(table_id).await?.len())
    }

    /// Mark one order paid
    ///
    /// The guard on status makes a retry a no-op for orders that were
    /// already settled: the update matches nothing and `Ok(false)` comes
    /// back instead of a double payment.
    pub async fn mark_paid(
        &self,
        id: &str,
        method: PaymentMethod,
        paid_date: i64,
    ) -> RepoResult<bool> {
        let thing = parse_id(id)?;
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $thing SET status = 'PAID', payment_method = $method, \
                 paid_date = $paid_date WHERE status != 'PAID'",
            )
            .bind(("thing", thing))
            .bind(("method", method))
            .bind(("paid_date", paid_date))
            .await?;
        let updated: Vec<Order> = result.take(0)?;
        Ok(!updated.is_empty())
    }

    /// Paid orders with `paid_date` in `[start, end)` millis, oldest first
    pub async fn find_paid_between(&self, start: i64, end: i64) -> RepoResult<Vec<Order>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM food_order \
                 WHERE status = 'PAID' AND paid_date >= $start AND paid_date < $end \
                 ORDER BY paid_date ASC",
            )
            .bind(("start", start))
            .bind(("end", end))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders)
    }
}

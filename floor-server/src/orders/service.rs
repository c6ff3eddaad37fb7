//! Order submission service
//!
//! Builds cart sessions against the live catalog and turns a submitted
//! cart into a pending order, transitioning the table when needed.

use shared::order::CartLineInput;
use shared::{FloorEvent, OrderStatus, TableStatus, util::now_millis};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::cart::CartSession;
use super::error::{FlowError, FlowResult};
use super::money;
use crate::core::FloorEvents;
use crate::db::models::Order;
use crate::db::repository::{FloorTableRepository, MenuItemRepository, OrderRepository};

pub struct OrderService {
    tables: FloorTableRepository,
    menu: MenuItemRepository,
    orders: OrderRepository,
    events: FloorEvents,
}

impl OrderService {
    pub fn new(db: Surreal<Db>, events: FloorEvents) -> Self {
        Self {
            tables: FloorTableRepository::new(db.clone()),
            menu: MenuItemRepository::new(db.clone()),
            orders: OrderRepository::new(db),
            events,
        }
    }

    /// Build a cart session from terminal input, snapshotting price and
    /// name from the catalog
    ///
    /// Prices never come from the client. Unknown and unavailable items
    /// are rejected before anything is added.
    pub async fn build_cart(
        &self,
        table_id: &str,
        lines: Vec<CartLineInput>,
    ) -> FlowResult<CartSession> {
        let mut cart = CartSession::new(table_id);
        for input in lines {
            money::validate_quantity(input.quantity)?;

            let item = self
                .menu
                .find_by_id(&input.menu_item_id)
                .await?
                .ok_or_else(|| FlowError::MenuItemNotFound(input.menu_item_id.clone()))?;
            if !item.is_available {
                return Err(FlowError::MenuItemUnavailable(item.name));
            }
            money::validate_price(item.price)?;

            cart.add_item(&input.menu_item_id, &item.name, item.price);
            if input.quantity > 1 {
                cart.change_quantity(&input.menu_item_id, input.quantity - 1);
            }
            cart.set_note(&input.menu_item_id, input.note);
        }
        Ok(cart)
    }

    /// Submit a cart as one order round
    ///
    /// The table transition is strictly ordered after the order write: a
    /// failed write leaves the table untouched, and a failed transition
    /// still leaves a valid pending order behind. The cart is cleared only
    /// on success.
    pub async fn submit(&self, cart: &mut CartSession) -> FlowResult<Order> {
        if cart.is_empty() {
            return Err(FlowError::EmptyCart);
        }

        let table_id = cart.table_id().to_string();
        let table = self
            .tables
            .find_by_id(&table_id)
            .await?
            .ok_or_else(|| FlowError::TableNotFound(table_id.clone()))?;

        let order = Order {
            id: None,
            table_id: table_id.clone(),
            table_number: table.table_number.clone(),
            items: cart.lines().to_vec(),
            total: cart.total(),
            status: OrderStatus::Pending,
            payment_method: None,
            paid_date: None,
            created_at: now_millis(),
        };
        let created = self.orders.create(order).await?;

        // First round on an empty table occupies it; later rounds leave the
        // status alone (AWAITING_PAYMENT included)
        if table.status == TableStatus::Empty {
            self.tables
                .update_status(&table_id, TableStatus::Occupied)
                .await?;
            self.events.publish(FloorEvent::TableStatusChanged {
                table_id: table_id.clone(),
                status: TableStatus::Occupied,
            });
        }

        cart.clear();

        tracing::info!(
            table_id = %table_id,
            order_id = %created.id_string(),
            session_id = %cart.id(),
            total = created.total,
            "Order submitted"
        );
        self.events.publish(FloorEvent::OrderPlaced {
            table_id,
            order_id: created.id_string(),
            total: created.total,
        });

        Ok(created)
    }
}

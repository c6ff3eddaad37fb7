//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::order::CartLineInput;

use crate::core::ServerState;
use crate::db::models::Order;
use crate::db::repository::OrderRepository;
use crate::orders::OrderService;
use crate::utils::{AppError, AppResult};

/// One cart submission from a terminal
#[derive(Debug, Deserialize)]
pub struct SubmitOrderPayload {
    pub table_id: String,
    pub lines: Vec<CartLineInput>,
}

/// POST /api/orders - submit a cart as one order round
///
/// The server rebuilds the cart against the live catalog (snapshot price
/// and name, duplicates merged) before submitting, so the client only ever
/// names items and quantities.
pub async fn submit(
    State(state): State<ServerState>,
    Json(payload): Json<SubmitOrderPayload>,
) -> AppResult<Json<Order>> {
    let service = OrderService::new(state.db.clone(), state.events.clone());
    let mut cart = service.build_cart(&payload.table_id, payload.lines).await?;
    let order = service.submit(&mut cart).await?;
    Ok(Json(order))
}

#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    pub table_id: String,
    /// Include settled rounds as well
    #[serde(default)]
    pub include_paid: bool,
}

/// GET /api/orders?table_id= - rounds for a table, oldest first
pub async fn list_by_table(
    State(state): State<ServerState>,
    Query(query): Query<OrdersQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = if query.include_paid {
        repo.find_by_table(&query.table_id).await?
    } else {
        repo.find_outstanding_by_table(&query.table_id).await?
    };
    Ok(Json(orders))
}

/// GET /api/orders/:id - fetch one order
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    Ok(Json(order))
}

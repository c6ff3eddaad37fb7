//! Floor Table API Handlers
//!
//! Table CRUD plus the table-scoped settlement surface: consolidated
//! bill, receipt preview and the settle action.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::{FloorEvent, PaymentMethod, TableStatus};

use crate::core::ServerState;
use crate::db::models::{FloorTable, FloorTableCreate, FloorTableUpdate};
use crate::db::repository::{FloorTableRepository, OrderRepository};
use crate::orders::{SettlementEngine, TableBill, receipt::render_receipt};
use crate::utils::{AppError, AppResult, time};

/// GET /api/tables - list all tables
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<FloorTable>>> {
    let repo = FloorTableRepository::new(state.db.clone());
    let tables = repo.find_all().await?;
    Ok(Json(tables))
}

/// GET /api/tables/:id - fetch one table
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<FloorTable>> {
    let repo = FloorTableRepository::new(state.db.clone());
    let table = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Table {} not found", id)))?;
    Ok(Json(table))
}

/// POST /api/tables - create a table
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<FloorTableCreate>,
) -> AppResult<Json<FloorTable>> {
    let repo = FloorTableRepository::new(state.db.clone());
    let table = repo.create(payload).await?;
    Ok(Json(table))
}

/// PUT /api/tables/:id - update a table
///
/// Setting `status` here is the staff escape hatch around the order-driven
/// state machine. Freeing a table that still owes money is allowed but
/// flagged in the log.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<FloorTableUpdate>,
) -> AppResult<Json<FloorTable>> {
    let repo = FloorTableRepository::new(state.db.clone());
    let requested_status = payload.status;

    if requested_status == Some(TableStatus::Empty) {
        let orders = OrderRepository::new(state.db.clone());
        let outstanding = orders.count_outstanding_by_table(&id).await?;
        if outstanding > 0 {
            tracing::warn!(
                table_id = %id,
                outstanding = outstanding,
                "Manually freeing a table that still has outstanding orders"
            );
        }
    }

    let table = repo.update(&id, payload).await?;

    if let Some(status) = requested_status {
        state.events.publish(FloorEvent::TableStatusChanged {
            table_id: id,
            status,
        });
    }

    Ok(Json(table))
}

/// DELETE /api/tables/:id - delete a table
///
/// Orders referencing the table are left in place as sales records.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = FloorTableRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;
    Ok(Json(result))
}

/// GET /api/tables/:id/bill - consolidated bill for the outstanding rounds
pub async fn bill(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<TableBill>> {
    let engine = SettlementEngine::new(state.db.clone(), state.events.clone());
    let bill = engine.compute_bill(&id).await?;
    Ok(Json(bill))
}

/// GET /api/tables/:id/receipt - text receipt preview
///
/// Works for unpaid tables too; rendering has no persisted effect.
pub async fn receipt(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<String> {
    let engine = SettlementEngine::new(state.db.clone(), state.events.clone());
    let bill = engine.compute_bill(&id).await?;
    let now = time::local_datetime(shared::util::now_millis(), state.config.timezone);
    Ok(render_receipt(&bill, &state.config.store_name, now))
}

#[derive(Debug, Deserialize)]
pub struct SettlePayload {
    pub payment_method: PaymentMethod,
}

/// POST /api/tables/:id/settle - mark every outstanding round paid and
/// free the table
pub async fn settle(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<SettlePayload>,
) -> AppResult<Json<TableBill>> {
    let engine = SettlementEngine::new(state.db.clone(), state.events.clone());
    let bill = engine.settle(&id, payload.payment_method).await?;
    Ok(Json(bill))
}

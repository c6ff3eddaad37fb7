//! Sales API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use shared::models::DailySales;

use crate::core::ServerState;
use crate::reports::SalesService;
use crate::utils::{AppResult, time};

#[derive(Debug, Deserialize)]
pub struct SalesQuery {
    /// Business date (YYYY-MM-DD); today when omitted
    pub date: Option<String>,
}

/// GET /api/sales?date=YYYY-MM-DD - daily sales summary
pub async fn daily(
    State(state): State<ServerState>,
    Query(query): Query<SalesQuery>,
) -> AppResult<Json<DailySales>> {
    let tz = state.config.timezone;
    let date = match &query.date {
        Some(date) => {
            let parsed = time::parse_date(date)?;
            time::validate_not_future(parsed, tz)?;
            parsed
        }
        None => chrono::Utc::now().with_timezone(&tz).date_naive(),
    };

    let service = SalesService::new(state.db.clone(), tz);
    let sales = service.daily(date).await?;
    Ok(Json(sales))
}

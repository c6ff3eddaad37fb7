//! API routing module
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`tables`] - floor table management, bill, receipt and settlement
//! - [`menu_items`] - menu catalog management
//! - [`orders`] - cart submission and per-table order listing
//! - [`sales`] - daily sales summary

pub mod health;
pub mod menu_items;
pub mod orders;
pub mod sales;
pub mod tables;

use axum::Router;

use crate::core::ServerState;

/// Assemble the full API router
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(tables::router())
        .merge(menu_items::router())
        .merge(orders::router())
        .merge(sales::router())
}

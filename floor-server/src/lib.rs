//! Floor Server - restaurant table, order and settlement backend
//!
//! # Module structure
//!
//! ```text
//! floor-server/src/
//! ├── core/          # Config, state, server, event bus
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # Embedded SurrealDB storage and repositories
//! ├── orders/        # Cart sessions, submission, settlement, receipts
//! ├── reports/       # Sales aggregation over settled orders
//! └── utils/         # Errors, logging, time helpers
//! ```
//!
//! The order flow is the core: a cart session accumulates lines for one
//! table visit, submission turns it into an immutable pending order and
//! occupies the table, and settlement reconciles every outstanding order
//! for the table into one payment before freeing it.

pub mod api;
pub mod core;
pub mod db;
pub mod orders;
pub mod reports;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, FloorEvents, Server, ServerState};
pub use crate::orders::{CartSession, FlowError, OrderService, SettlementEngine};
pub use crate::utils::{AppError, AppResult};

// Re-export logger functions
pub use crate::utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    ______          __
   / __/ /___  ____  _____
  / /_/ / __ \/ __ \/ ___/
 / __/ / /_/ / /_/ / /
/_/ /_/\____/\____/_/
   floor server - tables, orders, settlement
    "#
    );
}

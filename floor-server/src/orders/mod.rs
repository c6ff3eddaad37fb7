//! Order flow
//!
//! The table/order lifecycle:
//!
//! ```text
//! CartSession (one table visit, in memory)
//!     └─ submit ──▶ Order (PENDING round)  +  table EMPTY → OCCUPIED
//! SettlementEngine
//!     ├─ compute_bill ──▶ consolidated lines + grand total (pure read)
//!     └─ settle ──▶ every outstanding round PAID  +  table → EMPTY
//! ```

pub mod cart;
pub mod error;
pub mod money;
pub mod receipt;
pub mod service;
pub mod settlement;

pub use cart::CartSession;
pub use error::{FlowError, FlowResult};
pub use service::OrderService;
pub use settlement::{SettlementEngine, TableBill};

//! Database entity models
//!
//! Entities carry SurrealDB record ids; everything embedded (order lines,
//! status enums) comes from the `shared` crate so clients see the same
//! wire shapes.

pub mod floor_table;
pub mod menu_item;
pub mod order;
pub mod serde_helpers;

pub use floor_table::{FloorTable, FloorTableCreate, FloorTableUpdate};
pub use menu_item::{MenuItem, MenuItemCreate, MenuItemUpdate};
pub use order::Order;

//! Sales reporting over settled orders

pub mod sales;

pub use sales::{SalesService, summarize_day};

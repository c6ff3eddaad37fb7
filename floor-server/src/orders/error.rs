use thiserror::Error;

use crate::db::repository::RepoError;

/// Order flow errors
///
/// Validation variants are checked before any mutation, so a failed
/// operation leaves no partial state behind.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("No outstanding orders for table {0}")]
    NoOutstandingOrders(String),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Menu item not found: {0}")]
    MenuItemNotFound(String),

    #[error("Menu item not available: {0}")]
    MenuItemUnavailable(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Result type for order flow operations
pub type FlowResult<T> = Result<T, FlowError>;

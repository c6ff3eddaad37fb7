//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Menu category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MenuCategory {
    #[default]
    Main,
    Snack,
    Dessert,
    Drink,
}

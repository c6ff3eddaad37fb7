//! Money calculation utilities using rust_decimal for precision
//!
//! Amounts are stored as `f64` in the documents; every calculation runs
//! through `Decimal` and is rounded to 2 places half-up before going back
//! to storage or the wire.

use rust_decimal::prelude::*;
use shared::OrderLine;

use super::error::{FlowError, FlowResult};

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed unit price
const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
const MAX_QUANTITY: i32 = 9999;

/// f64 to Decimal, treating unrepresentable values as zero
pub fn dec(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Round to money precision
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Decimal back to an f64 amount for storage/serialization
pub fn to_amount(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or(0.0)
}

/// Unit price x quantity for one line
pub fn line_total(price: f64, quantity: i32) -> Decimal {
    dec(price) * Decimal::from(quantity)
}

/// Sum of line totals across a set of lines
pub fn sum_lines(lines: &[OrderLine]) -> Decimal {
    lines
        .iter()
        .map(|line| line_total(line.price, line.quantity))
        .sum()
}

/// Validate a snapshot price before it enters a cart line
pub fn validate_price(price: f64) -> FlowResult<()> {
    if !price.is_finite() {
        return Err(FlowError::InvalidAmount(format!(
            "price must be a finite number, got {}",
            price
        )));
    }
    if price < 0.0 {
        return Err(FlowError::InvalidAmount(format!(
            "price must be non-negative, got {}",
            price
        )));
    }
    if price > MAX_PRICE {
        return Err(FlowError::InvalidAmount(format!(
            "price exceeds maximum allowed ({}), got {}",
            MAX_PRICE, price
        )));
    }
    Ok(())
}

/// Validate a requested line quantity
pub fn validate_quantity(quantity: i32) -> FlowResult<()> {
    if quantity <= 0 {
        return Err(FlowError::InvalidQuantity(format!(
            "quantity must be positive, got {}",
            quantity
        )));
    }
    if quantity > MAX_QUANTITY {
        return Err(FlowError::InvalidQuantity(format!(
            "quantity exceeds maximum allowed ({}), got {}",
            MAX_QUANTITY, quantity
        )));
    }
    Ok(())
}

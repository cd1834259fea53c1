//! Money calculation utilities using rust_decimal for precision
//!
//! All calculations are done using `Decimal` internally, then converted to `f64`
//! for storage/serialization.

use rust_decimal::prelude::*;
use shared::models::OrderItem;

use crate::utils::validation::{MAX_NAME_LEN, validate_price, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed quantity per line
pub const MAX_QUANTITY: i64 = 9999;

/// Maximum number of lines per order
pub const MAX_ORDER_LINES: usize = 200;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Validate the submitted order lines
pub fn validate_order_items(items: &[OrderItem]) -> AppResult<()> {
    if items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty).for_field("items"));
    }
    if items.len() > MAX_ORDER_LINES {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("Order has too many lines ({}, max {MAX_ORDER_LINES})", items.len()),
        )
        .for_field("items"));
    }

    for (index, item) in items.iter().enumerate() {
        validate_required_text(&item.name, "items.name", MAX_NAME_LEN)
            .map_err(|e| e.with_detail("index", index))?;
        validate_price(item.price, "items.price").map_err(|e| e.with_detail("index", index))?;

        if item.quantity <= 0 {
            return Err(AppError::with_message(
                ErrorCode::InvalidQuantity,
                format!("quantity must be positive, got {}", item.quantity),
            )
            .for_field("items.quantity")
            .with_detail("index", index));
        }
        if item.quantity > MAX_QUANTITY {
            return Err(AppError::with_message(
                ErrorCode::InvalidQuantity,
                format!(
                    "quantity exceeds maximum allowed ({MAX_QUANTITY}), got {}",
                    item.quantity
                ),
            )
            .for_field("items.quantity")
            .with_detail("index", index));
        }
    }

    Ok(())
}

/// Line total: price × quantity
pub fn calculate_line_total(item: &OrderItem) -> Decimal {
    to_decimal(item.price) * Decimal::from(item.quantity)
}

/// Σ(price × quantity), rounded to cents
pub fn calculate_order_total(items: &[OrderItem]) -> f64 {
    let total: Decimal = items.iter().map(calculate_line_total).sum();
    to_f64(total)
}

/// Compare a client-supplied total with the recomputed one
///
/// Returns the server total. A client total further than one cent away is
/// rejected rather than silently replaced.
pub fn verify_client_total(items: &[OrderItem], client_total: Option<f64>) -> AppResult<f64> {
    let server_total = calculate_order_total(items);

    if let Some(client_total) = client_total {
        if !client_total.is_finite() {
            return Err(AppError::with_message(
                ErrorCode::OrderTotalMismatch,
                format!("totalAmount must be a finite number, got {client_total}"),
            )
            .for_field("totalAmount"));
        }
        let diff = (to_decimal(client_total) - to_decimal(server_total)).abs();
        if diff > MONEY_TOLERANCE {
            return Err(AppError::with_message(
                ErrorCode::OrderTotalMismatch,
                format!("totalAmount {client_total} does not match the items total {server_total}"),
            )
            .for_field("totalAmount")
            .with_detail("expected", server_total));
        }
    }

    Ok(server_total)
}

//! Validation utilities for the Stock Management Platform

use rust_decimal::Decimal;

use crate::models::TransactionType;

/// Maximum length of the free-text notes on a transaction
pub const MAX_NOTES_LENGTH: usize = 500;

/// Maximum absolute quantity of a single movement
pub const MAX_MOVEMENT_QUANTITY: i32 = 1_000_000;

/// Largest unit price the ledger stores (DECIMAL(10, 2) column)
pub fn max_unit_price() -> Decimal {
    Decimal::new(9_999_999_999, 2)
}

/// Validate a movement quantity against the sign and size rules for its type
///
/// PURCHASE and SALE require a strictly positive quantity. ADJUSTMENT
/// accepts a signed quantity but never zero. The absolute quantity is
/// bounded so delta arithmetic stays inside i32.
pub fn validate_movement_quantity(
    transaction_type: TransactionType,
    quantity: i32,
) -> Result<(), &'static str> {
    if quantity == 0 {
        return Err("Quantity must not be zero");
    }
    match transaction_type {
        TransactionType::Purchase | TransactionType::Sale if quantity < 0 => {
            return Err("Quantity must be greater than 0");
        }
        _ => {}
    }
    if quantity.unsigned_abs() > MAX_MOVEMENT_QUANTITY as u32 {
        return Err("Quantity exceeds the maximum movement size");
    }
    Ok(())
}

/// Validate a movement's unit price against the storable range
pub fn validate_unit_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("Unit price cannot be negative");
    }
    if price > max_unit_price() {
        return Err("Unit price exceeds the maximum supported value");
    }
    Ok(())
}

/// Validate transaction notes length
pub fn validate_notes(notes: &str) -> Result<(), &'static str> {
    if notes.chars().count() > MAX_NOTES_LENGTH {
        return Err("Notes cannot exceed 500 characters");
    }
    Ok(())
}

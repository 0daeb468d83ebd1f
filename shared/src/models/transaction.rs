//! Stock transaction models and ledger arithmetic
//!
//! A stock transaction is one recorded stock-affecting event. Its effect on
//! the product's on-hand quantity is fully described by
//! [`TransactionType::signed_delta`]; reversing an entry applies the negated
//! delta.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

/// Error for enum values received as free-form strings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized value: {0}")]
pub struct UnknownValue(pub String);

/// Stock transaction types
///
/// PURCHASE and SALE carry a positive quantity; the direction is implied by
/// the type. ADJUSTMENT carries a signed quantity: positive corrects stock
/// upward, negative corrects it downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "transaction_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Purchase,
    Sale,
    Adjustment,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Purchase => "PURCHASE",
            TransactionType::Sale => "SALE",
            TransactionType::Adjustment => "ADJUSTMENT",
        }
    }

    /// The signed change this transaction applies to a product's
    /// stock quantity
    pub fn signed_delta(&self, quantity: i32) -> i32 {
        match self {
            TransactionType::Purchase => quantity,
            TransactionType::Sale => -quantity,
            TransactionType::Adjustment => quantity,
        }
    }

    /// The type/quantity pair whose effect exactly undoes a recorded
    /// entry of this type and quantity
    pub fn reversal(&self, quantity: i32) -> (TransactionType, i32) {
        match self {
            TransactionType::Purchase => (TransactionType::Sale, quantity),
            TransactionType::Sale => (TransactionType::Purchase, quantity),
            TransactionType::Adjustment => (TransactionType::Adjustment, -quantity),
        }
    }
}

impl FromStr for TransactionType {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PURCHASE" => Ok(TransactionType::Purchase),
            "SALE" => Ok(TransactionType::Sale),
            "ADJUSTMENT" => Ok(TransactionType::Adjustment),
            _ => Err(UnknownValue(s.to_string())),
        }
    }
}

/// Stock transaction status
///
/// Any status may move to any other; a status change never re-triggers the
/// entry's stock effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "transaction_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Cancelled,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Completed => "COMPLETED",
            TransactionStatus::Cancelled => "CANCELLED",
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(TransactionStatus::Pending),
            "COMPLETED" => Ok(TransactionStatus::Completed),
            "CANCELLED" => Ok(TransactionStatus::Cancelled),
            _ => Err(UnknownValue(s.to_string())),
        }
    }
}

/// A recorded stock transaction (ledger entry)
///
/// Once the stock effect has been applied, `transaction_type` and `quantity`
/// are immutable; only `status` and `notes` may change.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StockTransaction {
    pub id: Uuid,
    pub product_id: Uuid,
    pub user_id: Uuid,
    pub transaction_type: TransactionType,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub status: TransactionStatus,
    pub notes: Option<String>,
    pub transaction_date: DateTime<Utc>,
}

/// Monetary total of a movement: unit price times the unsigned quantity
pub fn total_price(unit_price: Decimal, quantity: i32) -> Decimal {
    unit_price * Decimal::from(quantity.unsigned_abs())
}

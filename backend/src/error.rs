//! Error handling for the Stock Management Platform
//!
//! Every failure the ledger core can produce is a distinct variant so the
//! transport layer can map each one to a stable response. Failures abort
//! the operation with zero side effects.

use thiserror::Error;
use uuid::Uuid;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Product not found with id: {0}")]
    ProductNotFound(Uuid),

    #[error("User not found with id: {0}")]
    ActorNotFound(Uuid),

    #[error("Transaction not found with id: {0}")]
    EntryNotFound(Uuid),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error(
        "Insufficient stock for product: {product}. Available: {available}, Requested: {requested}"
    )]
    InsufficientStock {
        product: String,
        available: i32,
        requested: i32,
    },

    #[error("Unknown transaction type: {0}")]
    UnknownTransactionType(String),

    #[error("Invalid transaction status: {0}")]
    UnknownStatus(String),

    #[error("Concurrent stock update conflict")]
    ConcurrencyConflict,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            // Postgres serialization failure / deadlock detected
            if let Some(code) = db_err.code() {
                if code == "40001" || code == "40P01" {
                    return AppError::ConcurrencyConflict;
                }
            }
        }
        AppError::Database(err)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Result type alias for service methods
pub type AppResult<T> = Result<T, AppError>;

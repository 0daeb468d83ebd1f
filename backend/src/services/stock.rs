//! Stock mutator
//!
//! The single choke-point that changes a product's on-hand quantity. No
//! other code path writes `products.stock_quantity`.

use shared::models::TransactionType;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Applies signed quantity deltas to product stock records
pub struct StockService;

impl StockService {
    /// Apply one movement's stock effect inside the caller's transaction
    ///
    /// The update is a single conditional statement: it acquires the row
    /// lock, adds the signed delta, and refuses to commit a negative
    /// quantity, all atomically. Returns the post-update quantity.
    pub async fn apply(
        tx: &mut Transaction<'_, Postgres>,
        product_id: Uuid,
        transaction_type: TransactionType,
        quantity: i32,
    ) -> AppResult<i32> {
        let delta = transaction_type.signed_delta(quantity);

        let new_quantity = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE products
            SET stock_quantity = stock_quantity + $2, updated_at = NOW()
            WHERE id = $1 AND stock_quantity + $2 >= 0
            RETURNING stock_quantity
            "#,
        )
        .bind(product_id)
        .bind(delta)
        .fetch_optional(&mut **tx)
        .await?;

        match new_quantity {
            Some(updated) => {
                tracing::debug!(%product_id, delta, new_quantity = updated, "stock updated");
                Ok(updated)
            }
            None => {
                // The guard rejected the update: either the product is gone
                // or the delta would take stock below zero.
                let (name, available) = sqlx::query_as::<_, (String, i32)>(
                    "SELECT name, stock_quantity FROM products WHERE id = $1",
                )
                .bind(product_id)
                .fetch_optional(&mut **tx)
                .await?
                .ok_or(AppError::ProductNotFound(product_id))?;

                tracing::warn!(%product_id, delta, available, "stock update rejected");
                Err(AppError::InsufficientStock {
                    product: name,
                    available,
                    requested: delta.unsigned_abs() as i32,
                })
            }
        }
    }
}

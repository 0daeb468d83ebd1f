//! Stock-movement ledger service
//!
//! Orchestrates creation, status updates, reversal-on-delete, and queries of
//! stock transactions. Every movement runs as one database transaction: the
//! product row is locked, the invariant is checked, the stock mutator is
//! invoked, and the ledger entry is inserted; either all of it commits or
//! none of it does. The product row lock serializes movements per product
//! while leaving other products unblocked.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::models::{
    total_price, Product, StockTransaction, TransactionStatus, TransactionType, UnknownValue,
};
use shared::types::{DateRange, PaginatedResponse, Pagination, PaginationMeta};
use shared::validation::validate_movement_quantity;
use sqlx::PgPool;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};
use crate::services::stock::StockService;

const TRANSACTION_COLUMNS: &str = "id, product_id, user_id, transaction_type, quantity, \
     unit_price, total_price, status, notes, transaction_date";

/// Input for recording a stock movement
#[derive(Debug, Deserialize, Validate)]
pub struct RecordMovementInput {
    pub product_id: Uuid,
    /// Explicit actor override; defaults to the caller-resolved actor
    pub user_id: Option<Uuid>,
    pub transaction_type: TransactionType,
    pub quantity: i32,
    /// Defaults to the product's current unit price when omitted
    #[validate(custom = "validate_unit_price")]
    pub unit_price: Option<Decimal>,
    #[validate(length(max = 500, message = "Notes cannot exceed 500 characters"))]
    pub notes: Option<String>,
}

fn validate_unit_price(price: &Decimal) -> Result<(), ValidationError> {
    shared::validation::validate_unit_price(*price)
        .map_err(|_| ValidationError::new("unit_price_out_of_range"))
}

/// Parse a transaction type supplied as a string by the transport layer
pub fn parse_transaction_type(s: &str) -> AppResult<TransactionType> {
    s.parse()
        .map_err(|UnknownValue(v)| AppError::UnknownTransactionType(v))
}

/// Ledger service for recording and querying stock transactions
#[derive(Clone)]
pub struct LedgerService {
    db: PgPool,
}

impl LedgerService {
    /// Create a new LedgerService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a stock movement and apply its stock effect atomically
    ///
    /// `actor_id` is the caller-resolved identity of the user performing the
    /// movement; the input may name a different user explicitly.
    pub async fn record_movement(
        &self,
        actor_id: Uuid,
        input: RecordMovementInput,
    ) -> AppResult<StockTransaction> {
        // Quantity sign rules come before any other validation
        validate_movement_quantity(input.transaction_type, input.quantity)
            .map_err(|msg| AppError::InvalidQuantity(msg.to_string()))?;
        input.validate()?;

        let mut tx = self.db.begin().await?;

        // FOR UPDATE serializes concurrent movements on the same product
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, sku, description, unit_price, stock_quantity, reorder_level,
                   created_at, updated_at
            FROM products
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(input.product_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::ProductNotFound(input.product_id))?;

        let user_id = input.user_id.unwrap_or(actor_id);
        let actor_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                .bind(user_id)
                .fetch_one(&mut *tx)
                .await?;
        if !actor_exists {
            return Err(AppError::ActorNotFound(user_id));
        }

        // Pre-check the invariant against the locked row so the caller gets
        // the product name and available quantity in the failure
        if input.transaction_type == TransactionType::Sale
            && product.stock_quantity < input.quantity
        {
            return Err(AppError::InsufficientStock {
                product: product.name,
                available: product.stock_quantity,
                requested: input.quantity,
            });
        }

        let unit_price = input.unit_price.unwrap_or(product.unit_price);
        let total = total_price(unit_price, input.quantity);

        StockService::apply(&mut tx, product.id, input.transaction_type, input.quantity).await?;

        let entry = sqlx::query_as::<_, StockTransaction>(&format!(
            r#"
            INSERT INTO stock_transactions
                (product_id, user_id, transaction_type, quantity, unit_price, total_price,
                 status, notes, transaction_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {TRANSACTION_COLUMNS}
            "#
        ))
        .bind(product.id)
        .bind(user_id)
        .bind(input.transaction_type)
        .bind(input.quantity)
        .bind(unit_price)
        .bind(total)
        .bind(TransactionStatus::Completed)
        .bind(&input.notes)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            entry_id = %entry.id,
            product_id = %entry.product_id,
            transaction_type = entry.transaction_type.as_str(),
            quantity = entry.quantity,
            "movement recorded"
        );
        Ok(entry)
    }

    /// Record a purchase (stock increases)
    pub async fn purchase(
        &self,
        actor_id: Uuid,
        mut input: RecordMovementInput,
    ) -> AppResult<StockTransaction> {
        input.transaction_type = TransactionType::Purchase;
        self.record_movement(actor_id, input).await
    }

    /// Record a sale (stock decreases)
    pub async fn sell(
        &self,
        actor_id: Uuid,
        mut input: RecordMovementInput,
    ) -> AppResult<StockTransaction> {
        input.transaction_type = TransactionType::Sale;
        self.record_movement(actor_id, input).await
    }

    /// Record a stock adjustment (signed quantity)
    pub async fn adjust(
        &self,
        actor_id: Uuid,
        mut input: RecordMovementInput,
    ) -> AppResult<StockTransaction> {
        input.transaction_type = TransactionType::Adjustment;
        self.record_movement(actor_id, input).await
    }

    /// Delete a movement and undo its stock effect
    ///
    /// Applies the reverse movement and removes the entry in one database
    /// transaction, restoring the stock quantity the product would have had
    /// if the entry never occurred.
    pub async fn delete_movement(&self, entry_id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let entry = sqlx::query_as::<_, StockTransaction>(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM stock_transactions WHERE id = $1 FOR UPDATE"
        ))
        .bind(entry_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::EntryNotFound(entry_id))?;

        let (reverse_type, reverse_quantity) = entry.transaction_type.reversal(entry.quantity);
        StockService::apply(&mut tx, entry.product_id, reverse_type, reverse_quantity).await?;

        sqlx::query("DELETE FROM stock_transactions WHERE id = $1")
            .bind(entry_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            %entry_id,
            product_id = %entry.product_id,
            reverse_type = reverse_type.as_str(),
            reverse_quantity,
            "movement deleted and stock reverted"
        );
        Ok(())
    }

    /// Update a transaction's status without re-triggering its stock effect
    ///
    /// Any status may move to any other status.
    pub async fn update_status(
        &self,
        entry_id: Uuid,
        status: &str,
    ) -> AppResult<StockTransaction> {
        let status: TransactionStatus = status
            .parse()
            .map_err(|UnknownValue(v)| AppError::UnknownStatus(v))?;

        let entry = sqlx::query_as::<_, StockTransaction>(&format!(
            "UPDATE stock_transactions SET status = $2 WHERE id = $1 RETURNING {TRANSACTION_COLUMNS}"
        ))
        .bind(entry_id)
        .bind(status)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::EntryNotFound(entry_id))?;

        Ok(entry)
    }

    /// Update a transaction's notes
    ///
    /// Only notes may change; quantity and type are immutable once the
    /// stock effect has been applied. Omitted notes leave the stored
    /// notes unchanged.
    pub async fn update_notes(
        &self,
        entry_id: Uuid,
        notes: Option<String>,
    ) -> AppResult<StockTransaction> {
        if let Some(notes) = &notes {
            shared::validation::validate_notes(notes)
                .map_err(|msg| AppError::Validation(msg.to_string()))?;
        }

        let entry = sqlx::query_as::<_, StockTransaction>(&format!(
            "UPDATE stock_transactions SET notes = COALESCE($2, notes) \
             WHERE id = $1 RETURNING {TRANSACTION_COLUMNS}"
        ))
        .bind(entry_id)
        .bind(&notes)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::EntryNotFound(entry_id))?;

        Ok(entry)
    }

    /// Get a transaction by id
    pub async fn get_movement(&self, entry_id: Uuid) -> AppResult<StockTransaction> {
        let entry = sqlx::query_as::<_, StockTransaction>(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM stock_transactions WHERE id = $1"
        ))
        .bind(entry_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::EntryNotFound(entry_id))?;

        Ok(entry)
    }

    /// Get transactions for a product, newest first
    pub async fn list_by_product(&self, product_id: Uuid) -> AppResult<Vec<StockTransaction>> {
        let product_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(product_id)
                .fetch_one(&self.db)
                .await?;
        if !product_exists {
            return Err(AppError::ProductNotFound(product_id));
        }

        let entries = sqlx::query_as::<_, StockTransaction>(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM stock_transactions \
             WHERE product_id = $1 ORDER BY transaction_date DESC"
        ))
        .bind(product_id)
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }

    /// Get transactions performed by a user, newest first
    pub async fn list_by_actor(&self, user_id: Uuid) -> AppResult<Vec<StockTransaction>> {
        let user_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                .bind(user_id)
                .fetch_one(&self.db)
                .await?;
        if !user_exists {
            return Err(AppError::ActorNotFound(user_id));
        }

        let entries = sqlx::query_as::<_, StockTransaction>(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM stock_transactions \
             WHERE user_id = $1 ORDER BY transaction_date DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }

    /// Get transactions of one type, newest first
    pub async fn list_by_type(
        &self,
        transaction_type: TransactionType,
    ) -> AppResult<Vec<StockTransaction>> {
        let entries = sqlx::query_as::<_, StockTransaction>(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM stock_transactions \
             WHERE transaction_type = $1 ORDER BY transaction_date DESC"
        ))
        .bind(transaction_type)
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }

    /// Get transactions within a date range, newest first
    pub async fn list_by_date_range(&self, range: DateRange) -> AppResult<Vec<StockTransaction>> {
        let entries = sqlx::query_as::<_, StockTransaction>(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM stock_transactions \
             WHERE transaction_date BETWEEN $1 AND $2 ORDER BY transaction_date DESC"
        ))
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }

    /// List all transactions, paginated, newest first
    pub async fn list_all(
        &self,
        pagination: Pagination,
    ) -> AppResult<PaginatedResponse<StockTransaction>> {
        let total_items =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM stock_transactions")
                .fetch_one(&self.db)
                .await?;

        let entries = sqlx::query_as::<_, StockTransaction>(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM stock_transactions \
             ORDER BY transaction_date DESC LIMIT $1 OFFSET $2"
        ))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.db)
        .await?;

        Ok(PaginatedResponse {
            pagination: PaginationMeta::new(&pagination, total_items as u64),
            data: entries,
        })
    }
}

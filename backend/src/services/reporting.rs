//! Read-only inventory reporting
//!
//! Aggregations over the product and ledger stores. No invariant
//! enforcement happens here; everything is evaluated at query time.

use shared::models::{InventorySummary, Product};
use sqlx::PgPool;

use crate::error::AppResult;

/// Reporting service for stock-level queries
#[derive(Clone)]
pub struct ReportingService {
    db: PgPool,
}

impl ReportingService {
    /// Create a new ReportingService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Products at or below their reorder level
    pub async fn low_stock_products(&self) -> AppResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, sku, description, unit_price, stock_quantity, reorder_level,
                   created_at, updated_at
            FROM products
            WHERE stock_quantity <= reorder_level
            ORDER BY stock_quantity ASC, name ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(products)
    }

    /// Aggregate stock position across all products
    pub async fn inventory_summary(&self) -> AppResult<InventorySummary> {
        let (total_products, low_stock_products, total_stock_units) =
            sqlx::query_as::<_, (i64, i64, i64)>(
                r#"
                SELECT COUNT(*),
                       COUNT(*) FILTER (WHERE stock_quantity <= reorder_level),
                       COALESCE(SUM(stock_quantity), 0)
                FROM products
                "#,
            )
            .fetch_one(&self.db)
            .await?;

        Ok(InventorySummary {
            total_products,
            low_stock_products,
            total_stock_units,
        })
    }
}

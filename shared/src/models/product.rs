//! Product models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A product with its current stock position
///
/// `stock_quantity` is maintained incrementally by the stock mutator and is
/// never written by any other component.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    pub description: Option<String>,
    /// Default price used when a movement does not supply one
    pub unit_price: Decimal,
    pub stock_quantity: i32,
    pub reorder_level: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Whether the product is at or below its reorder level
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= self.reorder_level
    }
}

/// Aggregate stock position across all products
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventorySummary {
    pub total_products: i64,
    pub low_stock_products: i64,
    pub total_stock_units: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock_quantity: i32, reorder_level: i32) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "Test".to_string(),
            sku: "SKU-1".to_string(),
            description: None,
            unit_price: Decimal::new(1000, 2),
            stock_quantity,
            reorder_level,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_low_stock_at_threshold() {
        assert!(product(5, 5).is_low_stock());
        assert!(product(4, 5).is_low_stock());
        assert!(!product(6, 5).is_low_stock());
    }
}

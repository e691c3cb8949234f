//! Catalog response types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::ProductId;

/// Product details returned by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: Decimal,
    /// Image URL.
    pub image: String,
}

/// Stock level snapshot for a single product.
///
/// A point-in-time reading; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockInfo {
    /// Product the reading is for.
    pub id: ProductId,
    /// Units currently available, >= 0.
    pub amount: i64,
}

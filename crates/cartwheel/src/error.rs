//! Internal cart error taxonomy.
//!
//! These errors never cross the public operation boundary: `CartStore`
//! recovers every one of them into a user-facing [`crate::notify::Notice`].
//! They exist as explicit values so each failure kind stays distinguishable
//! in logs and tests.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::models::ProductId;
use crate::storage::StorageError;

/// Ways a cart operation can fail internally.
#[derive(Debug, Error)]
pub enum CartError {
    /// The product to remove is not in the cart.
    #[error("product {0} is not in the cart")]
    NotInCart(ProductId),

    /// The requested quantity exceeds the catalog's stock.
    #[error("requested {requested} of product {product_id}, only {available} in stock")]
    InsufficientStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// Catalog lookup failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Persisting the cart failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Encoding the cart for persistence failed.
    #[error("cart serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

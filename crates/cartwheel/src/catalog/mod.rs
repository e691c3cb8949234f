//! Catalog API client.
//!
//! The catalog is the remote, read-only source of product details and stock
//! levels. Product lookups are cached with `moka` (5-minute TTL); stock
//! lookups are mutable state and always hit the network.
//!
//! [`CatalogApi`] is the seam the cart store depends on, so tests can script
//! catalog behavior without a server.

mod client;
mod types;

pub use client::CatalogClient;
pub use types::{Product, StockInfo};

use async_trait::async_trait;
use thiserror::Error;

use crate::models::ProductId;

/// Errors that can occur when talking to the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Product not known to the catalog.
    #[error("product not found: {0}")]
    NotFound(ProductId),

    /// Failed to parse a response body.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only access to product details and stock levels.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetch the details of a product.
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError>;

    /// Fetch the current stock level of a product.
    async fn stock(&self, id: ProductId) -> Result<StockInfo, CatalogError>;
}

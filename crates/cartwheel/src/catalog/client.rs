//! HTTP implementation of the catalog API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::config::CartConfig;
use crate::models::ProductId;

use super::{CatalogApi, CatalogError, Product, StockInfo};

/// Client for the storefront's JSON REST catalog.
///
/// Product details are cached for 5 minutes. Stock levels change between
/// requests and are never cached.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<ProductId, Product>,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CartConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        let base_url = config.catalog_url.as_str().trim_end_matches('/').to_string();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url,
                cache,
            }),
        }
    }

    /// Execute a GET request and decode the JSON body.
    ///
    /// The body is read as text first so parse failures can be logged with
    /// the offending payload.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        id: ProductId,
    ) -> Result<T, CatalogError> {
        let url = format!("{}/{path}", self.inner.base_url);

        let response = self.inner.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id));
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let response_text = response.text().await?;

        match serde_json::from_str(&response_text) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse catalog response"
                );
                Err(CatalogError::Parse(e))
            }
        }
    }

    /// Invalidate a cached product.
    pub async fn invalidate_product(&self, id: ProductId) {
        self.inner.cache.invalidate(&id).await;
    }

    /// Invalidate all cached products.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    /// Get a product's details by its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        // Check cache
        if let Some(product) = self.inner.cache.get(&id).await {
            debug!("Cache hit for product");
            return Ok(product);
        }

        let product: Product = self.get_json(&format!("products/{id}"), id).await?;

        // Cache the result
        self.inner.cache.insert(id, product.clone()).await;

        Ok(product)
    }

    /// Get a product's current stock level.
    ///
    /// Not cached - stock is mutable state.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    async fn stock(&self, id: ProductId) -> Result<StockInfo, CatalogError> {
        self.get_json(&format!("stock/{id}"), id).await
    }
}

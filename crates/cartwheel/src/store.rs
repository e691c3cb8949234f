//! The cart store.
//!
//! [`CartStore`] owns the in-memory cart, is the sole writer of its storage
//! slot, and exposes the three cart operations. Every accepted mutation is
//! persisted before it becomes visible in memory, so the in-memory cart
//! always equals the last successfully persisted blob. Every failure is
//! recovered at this boundary into a [`Notice`]; operations return nothing.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, instrument, warn};

use crate::catalog::{CatalogApi, CatalogClient};
use crate::config::CartConfig;
use crate::error::CartError;
use crate::models::{Cart, LineItem, ProductId};
use crate::notify::{Notice, NotificationSink, TracingNotifier};
use crate::storage::{CartStorage, JsonFileStorage, StorageError};

/// Client-side shopping cart backed by write-through persistence.
///
/// Operations read the current cart, suspend only on the catalog fetch, and
/// commit after persisting. Two operations issued concurrently can therefore
/// lose one update to the other; mutations are not serialized through a
/// queue. Callers that need strict ordering must issue operations one at a
/// time.
pub struct CartStore {
    catalog: Arc<dyn CatalogApi>,
    storage: Arc<dyn CartStorage>,
    notifier: Arc<dyn NotificationSink>,
    key: String,
    cart: Mutex<Cart>,
}

impl CartStore {
    /// Load a cart store from its storage slot.
    ///
    /// An absent blob starts an empty cart. An unparseable blob is logged
    /// and also starts an empty cart rather than failing startup.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read at all.
    pub async fn load(
        catalog: Arc<dyn CatalogApi>,
        storage: Arc<dyn CartStorage>,
        notifier: Arc<dyn NotificationSink>,
        key: impl Into<String>,
    ) -> Result<Self, StorageError> {
        let key = key.into();

        let cart = match storage.get(&key).await? {
            Some(blob) => match serde_json::from_str::<Cart>(&blob) {
                Ok(cart) => {
                    debug!(key = %key, lines = cart.len(), "Loaded persisted cart");
                    cart
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "Persisted cart is malformed, starting empty");
                    Cart::new()
                }
            },
            None => Cart::new(),
        };

        Ok(Self {
            catalog,
            storage,
            notifier,
            key,
            cart: Mutex::new(cart),
        })
    }

    /// Open a cart store wired to the default collaborators: the HTTP
    /// catalog client, file-backed storage, and the tracing notifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage file cannot be read.
    pub async fn open(config: &CartConfig) -> Result<Self, StorageError> {
        Self::load(
            Arc::new(CatalogClient::new(config)),
            Arc::new(JsonFileStorage::new(&config.storage_path)),
            Arc::new(TracingNotifier),
            config.storage_key.clone(),
        )
        .await
    }

    /// The current cart (read-only view).
    #[must_use]
    pub fn cart(&self) -> Cart {
        self.snapshot()
    }

    /// Add one unit of a product to the cart.
    ///
    /// A product already in the cart goes through [`Self::set_amount`] with
    /// its quantity incremented, so the same stock ceiling applies and a
    /// ceiling hit surfaces as [`Notice::OutOfStock`]. Failures in add's own
    /// fetch or persist path surface as [`Notice::AddFailed`]; the cart is
    /// unchanged on any failure.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add(&self, product_id: ProductId) {
        if let Some(amount) = self.snapshot().amount_of(product_id) {
            self.set_amount(product_id, amount + 1).await;
            return;
        }

        if let Err(e) = self.try_add_new(product_id).await {
            warn!(error = %e, "Failed to add product to cart");
            self.notifier.notify(Notice::AddFailed);
        }
    }

    /// Remove a product's line from the cart.
    ///
    /// Removing a product that is not in the cart is an error, not a no-op:
    /// it surfaces as [`Notice::RemoveFailed`], as does any persistence
    /// failure. The cart is unchanged on any failure.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn remove(&self, product_id: ProductId) {
        if let Err(e) = self.try_remove(product_id).await {
            warn!(error = %e, "Failed to remove product from cart");
            self.notifier.notify(Notice::RemoveFailed);
        }
    }

    /// Set the quantity of a product's line.
    ///
    /// Amounts below 1 are ignored; they come from decrement controls
    /// clicking past the minimum. A quantity above the catalog's current
    /// stock surfaces as [`Notice::OutOfStock`]; any other failure surfaces
    /// as [`Notice::UpdateFailed`]. The cart is unchanged on any failure.
    #[instrument(skip(self), fields(product_id = %product_id, amount))]
    pub async fn set_amount(&self, product_id: ProductId, amount: i64) {
        if amount < 1 {
            return;
        }

        match self.try_set_amount(product_id, amount).await {
            Ok(()) => {}
            Err(e @ CartError::InsufficientStock { .. }) => {
                debug!(error = %e, "Stock ceiling rejected quantity");
                self.notifier.notify(Notice::OutOfStock);
            }
            Err(e) => {
                warn!(error = %e, "Failed to update product quantity");
                self.notifier.notify(Notice::UpdateFailed);
            }
        }
    }

    async fn try_add_new(&self, product_id: ProductId) -> Result<(), CartError> {
        let product = self.catalog.product(product_id).await?;

        let mut next = self.snapshot();
        next.push(LineItem::from(product));

        self.persist(&next).await?;
        self.commit(next);
        Ok(())
    }

    async fn try_remove(&self, product_id: ProductId) -> Result<(), CartError> {
        let mut next = self.snapshot();
        if !next.remove(product_id) {
            return Err(CartError::NotInCart(product_id));
        }

        self.persist(&next).await?;
        self.commit(next);
        Ok(())
    }

    async fn try_set_amount(&self, product_id: ProductId, amount: i64) -> Result<(), CartError> {
        let stock = self.catalog.stock(product_id).await?;
        if amount > stock.amount {
            return Err(CartError::InsufficientStock {
                product_id,
                requested: amount,
                available: stock.amount,
            });
        }

        let mut next = self.snapshot();
        next.set_amount(product_id, amount);

        self.persist(&next).await?;
        self.commit(next);
        Ok(())
    }

    /// Write the full cart through to storage.
    async fn persist(&self, cart: &Cart) -> Result<(), CartError> {
        let blob = serde_json::to_string(cart)?;
        self.storage.set(&self.key, &blob).await?;
        Ok(())
    }

    fn snapshot(&self) -> Cart {
        self.cart
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Make a persisted cart the visible one.
    fn commit(&self, next: Cart) {
        *self.cart.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }
}

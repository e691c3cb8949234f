//! Integration test support for Cartwheel.
//!
//! Provides scripted in-memory collaborators for driving a
//! [`CartStore`](cartwheel::store::CartStore) end to end without a catalog
//! server or a filesystem:
//!
//! - [`MockCatalog`] - scripted products and stock levels, can go offline
//! - [`RecordingNotifier`] - captures emitted notices for assertions
//! - [`FailingStorage`] - storage wrapper whose writes can be made to fail
//! - [`TestContext`] - a cart store wired to all of the above

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use cartwheel::catalog::{CatalogApi, CatalogError, Product, StockInfo};
use cartwheel::models::{Cart, ProductId};
use cartwheel::notify::{Notice, NotificationSink};
use cartwheel::storage::{CartStorage, MemoryStorage, StorageError};
use cartwheel::store::CartStore;

// =============================================================================
// MockCatalog
// =============================================================================

/// Catalog with scripted products and stock levels.
#[derive(Default)]
pub struct MockCatalog {
    products: Mutex<HashMap<ProductId, Product>>,
    stock: Mutex<HashMap<ProductId, i64>>,
    offline: AtomicBool,
}

impl MockCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a product with the given stock level.
    #[must_use]
    pub fn with_product(self, id: i64, title: &str, price: &str, stock: i64) -> Self {
        let id = ProductId::new(id);
        let product = Product {
            id,
            title: title.to_string(),
            price: price.parse().expect("test price must parse"),
            image: format!("https://cdn.example.com/products/{id}.jpg"),
        };
        lock(&self.products).insert(id, product);
        lock(&self.stock).insert(id, stock);
        self
    }

    /// Change a product's stock level mid-test.
    pub fn set_stock(&self, id: i64, amount: i64) {
        lock(&self.stock).insert(ProductId::new(id), amount);
    }

    /// Make every subsequent request fail like an unreachable service.
    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    /// Restore normal operation after [`Self::go_offline`].
    pub fn go_online(&self) {
        self.offline.store(false, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), CatalogError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(CatalogError::Api {
                status: 503,
                message: "catalog unreachable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogApi for MockCatalog {
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.check_online()?;
        lock(&self.products)
            .get(&id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    async fn stock(&self, id: ProductId) -> Result<StockInfo, CatalogError> {
        self.check_online()?;
        lock(&self.stock)
            .get(&id)
            .copied()
            .map(|amount| StockInfo { id, amount })
            .ok_or(CatalogError::NotFound(id))
    }
}

// =============================================================================
// RecordingNotifier
// =============================================================================

/// Notification sink that records every notice it receives.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices emitted so far, in order.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        lock(&self.notices).clone()
    }

    /// Whether nothing has been emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock(&self.notices).is_empty()
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        lock(&self.notices).push(notice);
    }
}

// =============================================================================
// FailingStorage
// =============================================================================

/// In-memory storage whose writes can be switched to fail.
#[derive(Default)]
pub struct FailingStorage {
    inner: MemoryStorage,
    fail_writes: AtomicBool,
}

impl FailingStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with an I/O error.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl CartStorage for FailingStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Io(std::io::Error::other(
                "storage write failed",
            )));
        }
        self.inner.set(key, value).await
    }
}

// =============================================================================
// TestContext
// =============================================================================

/// Storage slot all test carts persist under.
pub const CART_KEY: &str = "cart";

/// A cart store wired to scripted collaborators.
pub struct TestContext {
    pub catalog: Arc<MockCatalog>,
    pub storage: Arc<MemoryStorage>,
    pub notifier: Arc<RecordingNotifier>,
    pub store: CartStore,
}

impl TestContext {
    /// Build a store over an empty storage slot.
    pub async fn new(catalog: MockCatalog) -> Self {
        Self::with_storage(catalog, MemoryStorage::new()).await
    }

    /// Build a store over pre-seeded storage.
    pub async fn with_storage(catalog: MockCatalog, storage: MemoryStorage) -> Self {
        init_tracing();

        let catalog = Arc::new(catalog);
        let storage = Arc::new(storage);
        let notifier = Arc::new(RecordingNotifier::new());

        let store = CartStore::load(
            catalog.clone(),
            storage.clone(),
            notifier.clone(),
            CART_KEY,
        )
        .await
        .expect("in-memory storage reads cannot fail");

        Self {
            catalog,
            storage,
            notifier,
            store,
        }
    }

    /// The blob currently persisted in the cart slot.
    pub async fn persisted_blob(&self) -> Option<String> {
        self.storage
            .get(CART_KEY)
            .await
            .expect("in-memory storage reads cannot fail")
    }

    /// The cart currently persisted in the cart slot, decoded.
    pub async fn persisted_cart(&self) -> Option<Cart> {
        self.persisted_blob()
            .await
            .map(|blob| serde_json::from_str(&blob).expect("persisted cart must decode"))
    }

    /// Assert the write-through invariant: the in-memory cart equals the
    /// persisted blob.
    pub async fn assert_write_through(&self) {
        let persisted = self.persisted_cart().await.unwrap_or_default();
        assert_eq!(
            self.store.cart(),
            persisted,
            "in-memory cart diverged from storage"
        );
    }
}

/// Install a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

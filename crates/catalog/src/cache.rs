use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use domain::Product;
use store::{ProductStore, StoreError};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

struct CacheEntry {
    product: Product,
    cached_at: Instant,
}

struct ListSlot {
    products: Vec<Product>,
    cached_at: Instant,
}

/// Read-through, time-bounded cache in front of a product store.
///
/// Implements [`ProductStore`] itself so it drops in wherever the backing
/// store would be used. Per-id entries and the full-list slot expire after
/// the TTL fixed at construction; every write through the proxy invalidates
/// the list slot and refreshes (or removes) the per-id entry. Writes that
/// bypass the proxy surface only after expiry.
pub struct CachedProductStore {
    inner: Arc<dyn ProductStore>,
    ttl: Duration,
    entries: RwLock<HashMap<Uuid, CacheEntry>>,
    list: RwLock<Option<ListSlot>>,
}

impl CachedProductStore {
    pub fn new(inner: Arc<dyn ProductStore>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: RwLock::new(HashMap::new()),
            list: RwLock::new(None),
        }
    }

    /// Ten-minute TTL, matching the catalog's tolerance for staleness.
    pub fn with_default_ttl(inner: Arc<dyn ProductStore>) -> Self {
        Self::new(inner, DEFAULT_TTL)
    }

    fn is_fresh(&self, cached_at: Instant) -> bool {
        cached_at.elapsed() <= self.ttl
    }
}

#[async_trait]
impl ProductStore for CachedProductStore {
    async fn find_all(&self) -> Result<Vec<Product>, StoreError> {
        {
            let list = self.list.read().await;
            if let Some(slot) = list.as_ref() {
                if self.is_fresh(slot.cached_at) {
                    debug!("Serving product list from cache");
                    return Ok(slot.products.clone());
                }
            }
        }

        debug!("Product list cache miss, refetching");
        let products = self.inner.find_all().await?;

        let mut list = self.list.write().await;
        *list = Some(ListSlot {
            products: products.clone(),
            cached_at: Instant::now(),
        });

        Ok(products)
    }

    async fn get(&self, product_id: Uuid) -> Result<Product, StoreError> {
        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(&product_id) {
                if self.is_fresh(entry.cached_at) {
                    debug!(product_id = %product_id, "Product cache hit");
                    return Ok(entry.product.clone());
                }
            }
        }

        debug!(product_id = %product_id, "Product cache miss");
        // Absence is never cached: a NotFound propagates without an entry,
        // so every lookup of a missing id re-queries the store.
        let product = self.inner.get(product_id).await?;

        self.entries.write().await.insert(
            product_id,
            CacheEntry {
                product: product.clone(),
                cached_at: Instant::now(),
            },
        );

        Ok(product)
    }

    async fn put(&self, product: &Product) -> Result<(), StoreError> {
        self.inner.put(product).await?;

        self.entries.write().await.insert(
            product.id,
            CacheEntry {
                product: product.clone(),
                cached_at: Instant::now(),
            },
        );
        *self.list.write().await = None;

        info!(product_id = %product.id, "Product written through, list cache invalidated");

        Ok(())
    }

    async fn delete(&self, product_id: Uuid) -> Result<(), StoreError> {
        let result = self.inner.delete(product_id).await;

        // Drop the entry even when the store reports it missing; whatever
        // the cache holds for this id is stale either way.
        self.entries.write().await.remove(&product_id);
        *self.list.write().await = None;

        info!(product_id = %product_id, "Product delete written through, caches invalidated");

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::MemoryProductStore;

    fn product(name: &str, price: f64) -> Product {
        Product::new(name.to_string(), format!("{name} description"), price)
    }

    async fn seeded() -> (Arc<MemoryProductStore>, CachedProductStore, Product) {
        let inner = Arc::new(MemoryProductStore::new());
        let p = product("Widget", 9.99);
        inner.put(&p).await.unwrap();
        let cache = CachedProductStore::new(inner.clone(), Duration::from_secs(600));
        (inner, cache, p)
    }

    #[tokio::test]
    async fn test_get_within_ttl_hits_the_store_once() {
        let (inner, cache, p) = seeded().await;

        let first = cache.get(p.id).await.unwrap();
        let second = cache.get(p.id).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(inner.get_fetches(), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_is_refetched() {
        let inner = Arc::new(MemoryProductStore::new());
        let p = product("Widget", 9.99);
        inner.put(&p).await.unwrap();
        let cache = CachedProductStore::new(inner.clone(), Duration::from_millis(20));

        cache.get(p.id).await.unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;
        cache.get(p.id).await.unwrap();

        assert_eq!(inner.get_fetches(), 2);
    }

    #[tokio::test]
    async fn test_put_refreshes_entry_before_expiry() {
        let (inner, cache, mut p) = seeded().await;

        assert_eq!(cache.get(p.id).await.unwrap().price, 9.99);

        p.price = 12.50;
        cache.put(&p).await.unwrap();

        // The new value is visible immediately, and from the cache.
        let fetched_before = inner.get_fetches();
        assert_eq!(cache.get(p.id).await.unwrap().price, 12.50);
        assert_eq!(inner.get_fetches(), fetched_before);
    }

    #[tokio::test]
    async fn test_find_all_is_cached_within_ttl() {
        let (inner, cache, _p) = seeded().await;

        let first = cache.find_all().await.unwrap();
        let second = cache.find_all().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(inner.list_fetches(), 1);
    }

    #[tokio::test]
    async fn test_put_invalidates_the_list_slot() {
        let (inner, cache, _p) = seeded().await;

        assert_eq!(cache.find_all().await.unwrap().len(), 1);

        let extra = product("Gadget", 19.99);
        cache.put(&extra).await.unwrap();

        let listed = cache.find_all().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(inner.list_fetches(), 2);
    }

    #[tokio::test]
    async fn test_delete_drops_entry_and_list() {
        let (inner, cache, p) = seeded().await;

        cache.get(p.id).await.unwrap();
        cache.find_all().await.unwrap();

        cache.delete(p.id).await.unwrap();

        assert!(matches!(
            cache.get(p.id).await.unwrap_err(),
            StoreError::NotFound(_)
        ));
        assert!(cache.find_all().await.unwrap().is_empty());
        assert_eq!(inner.list_fetches(), 2);
    }

    #[tokio::test]
    async fn test_absence_is_never_cached() {
        let (inner, cache, _p) = seeded().await;
        let missing = Uuid::new_v4();

        assert!(cache.get(missing).await.is_err());
        assert!(cache.get(missing).await.is_err());

        // Both misses reached the store.
        assert_eq!(inner.get_fetches(), 2);
    }

    #[tokio::test]
    async fn test_bypassing_writes_surface_after_expiry() {
        let inner = Arc::new(MemoryProductStore::new());
        let mut p = product("Widget", 9.99);
        inner.put(&p).await.unwrap();
        let cache = CachedProductStore::new(inner.clone(), Duration::from_millis(20));

        assert_eq!(cache.get(p.id).await.unwrap().price, 9.99);

        // Write around the proxy.
        p.price = 15.0;
        inner.put(&p).await.unwrap();

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(cache.get(p.id).await.unwrap().price, 15.0);
    }
}

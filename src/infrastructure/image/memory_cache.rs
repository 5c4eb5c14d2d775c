//! In-memory image cache table.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use tokio::sync::RwLock;
use tracing::{debug, trace};

use crate::domain::entities::ImageKey;
use crate::domain::ports::ImageStorePort;

/// In-memory table from image key to decoded image.
///
/// Unbounded by default: the expected working set is a few dozen thumbnails
/// that live as long as the cache object. A bounded constructor turns on LRU
/// eviction for embedders that need a memory ceiling. Thread-safe either way.
pub struct MemoryImageCache {
    table: RwLock<LruCache<ImageKey, Arc<image::DynamicImage>>>,
    hits: std::sync::atomic::AtomicU64,
    misses: std::sync::atomic::AtomicU64,
}

impl MemoryImageCache {
    /// Creates a cache with no capacity limit.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            table: RwLock::new(LruCache::unbounded()),
            hits: std::sync::atomic::AtomicU64::new(0),
            misses: std::sync::atomic::AtomicU64::new(0),
        }
    }

    /// Creates a cache holding at most `capacity` images, evicting the least
    /// recently used entry beyond that.
    #[must_use]
    pub fn bounded(capacity: NonZeroUsize) -> Self {
        Self {
            table: RwLock::new(LruCache::new(capacity)),
            hits: std::sync::atomic::AtomicU64::new(0),
            misses: std::sync::atomic::AtomicU64::new(0),
        }
    }

    /// Creates a cache from an optional capacity, `None` meaning unbounded.
    #[must_use]
    pub fn with_capacity(capacity: Option<NonZeroUsize>) -> Self {
        match capacity {
            Some(cap) => Self::bounded(cap),
            None => Self::unbounded(),
        }
    }

    /// Peeks at an image without promoting it in the LRU order.
    pub async fn peek(&self, key: &ImageKey) -> Option<Arc<image::DynamicImage>> {
        let table = self.table.read().await;
        table.peek(key).cloned()
    }

    /// Returns cache statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(std::sync::atomic::Ordering::Relaxed);
        let misses = self.misses.load(std::sync::atomic::Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        CacheStats {
            hits,
            misses,
            hit_rate,
            size: self.len(),
        }
    }
}

impl Default for MemoryImageCache {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Statistics about cache performance.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Hit rate as a percentage.
    pub hit_rate: f64,
    /// Current number of cached images.
    pub size: usize,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cache: {} images, {:.1}% hit rate ({} hits, {} misses)",
            self.size, self.hit_rate, self.hits, self.misses
        )
    }
}

#[async_trait::async_trait]
impl ImageStorePort for MemoryImageCache {
    async fn get(&self, key: &ImageKey) -> Option<Arc<image::DynamicImage>> {
        let mut table = self.table.write().await;
        if let Some(img) = table.get(key) {
            self.hits.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            trace!(key = %key, "Memory cache hit");
            Some(img.clone())
        } else {
            self.misses
                .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            trace!(key = %key, "Memory cache miss");
            None
        }
    }

    async fn put(&self, key: ImageKey, image: Arc<image::DynamicImage>) {
        let mut table = self.table.write().await;
        debug!(key = %key, "Storing image in memory cache");
        table.put(key, image);
    }

    async fn evict(&self, key: &ImageKey) {
        let mut table = self.table.write().await;
        if table.pop(key).is_some() {
            debug!(key = %key, "Evicted image from memory cache");
        }
    }

    fn len(&self) -> usize {
        // Best-effort under concurrent writers.
        let table = self.table.try_read();
        table.map(|t| t.len()).unwrap_or(0)
    }

    async fn clear(&self) {
        let mut table = self.table.write().await;
        table.clear();
        debug!("Cleared memory image cache");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_image() -> Arc<image::DynamicImage> {
        Arc::new(image::DynamicImage::new_rgb8(10, 10))
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let cache = MemoryImageCache::unbounded();
        let key = ImageKey::from("https://example.test/a.jpg");

        cache.put(key.clone(), test_image()).await;
        let retrieved = cache.get(&key).await;

        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().width(), 10);
    }

    #[tokio::test]
    async fn test_miss() {
        let cache = MemoryImageCache::unbounded();
        let key = ImageKey::from("https://example.test/missing.jpg");

        assert!(cache.get(&key).await.is_none());
    }

    #[tokio::test]
    async fn test_one_value_per_key() {
        let cache = MemoryImageCache::unbounded();
        let key = ImageKey::from("https://example.test/a.jpg");

        cache.put(key.clone(), test_image()).await;
        let replacement = Arc::new(image::DynamicImage::new_rgb8(20, 20));
        cache.put(key.clone(), replacement).await;

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key).await.unwrap().width(), 20);
    }

    #[tokio::test]
    async fn test_unbounded_holds_everything() {
        let cache = MemoryImageCache::unbounded();

        for i in 0..100 {
            let key = ImageKey::from(format!("https://example.test/{i}.jpg"));
            cache.put(key, test_image()).await;
        }

        assert_eq!(cache.len(), 100);
    }

    #[tokio::test]
    async fn test_bounded_evicts_lru() {
        let cache = MemoryImageCache::bounded(NonZeroUsize::new(2).unwrap());

        let key1 = ImageKey::from("https://example.test/1.jpg");
        let key2 = ImageKey::from("https://example.test/2.jpg");
        let key3 = ImageKey::from("https://example.test/3.jpg");

        cache.put(key1.clone(), test_image()).await;
        cache.put(key2.clone(), test_image()).await;
        cache.put(key3.clone(), test_image()).await;

        // key1 is the least recently used
        assert!(cache.get(&key1).await.is_none());
        assert!(cache.get(&key2).await.is_some());
        assert!(cache.get(&key3).await.is_some());
    }

    #[tokio::test]
    async fn test_stats() {
        let cache = MemoryImageCache::unbounded();
        let key = ImageKey::from("https://example.test/a.jpg");

        cache.put(key.clone(), test_image()).await;
        let _ = cache.get(&key).await;
        let _ = cache.get(&ImageKey::from("https://example.test/other.jpg")).await;

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
    }

    #[tokio::test]
    async fn test_peek_does_not_promote() {
        let cache = MemoryImageCache::bounded(NonZeroUsize::new(2).unwrap());

        let key1 = ImageKey::from("https://example.test/1.jpg");
        let key2 = ImageKey::from("https://example.test/2.jpg");

        cache.put(key1.clone(), test_image()).await;
        cache.put(key2.clone(), test_image()).await;

        let _ = cache.peek(&key1).await;

        let key3 = ImageKey::from("https://example.test/3.jpg");
        cache.put(key3, test_image()).await;

        assert!(cache.peek(&key1).await.is_none());
    }
}

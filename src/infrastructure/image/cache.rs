//! Fetch-and-store image cache.
//!
//! On a miss the cache downloads the resource through its fetcher port,
//! decodes it, optionally re-encodes it at a lossy quality to bound the
//! in-memory footprint, and stores the result. Concurrent misses for the
//! same key share a single in-flight fetch.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

use bytes::Bytes;
use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use tokio::sync::Mutex;
use tracing::{debug, trace, warn};

use super::memory_cache::{CacheStats, MemoryImageCache};
use crate::domain::entities::ImageKey;
use crate::domain::errors::FetchError;
use crate::domain::ports::{ImageFetcherPort, ImageStorePort};

type LoadResult = Result<Arc<DynamicImage>, FetchError>;
type InFlight = Shared<BoxFuture<'static, LoadResult>>;

/// Recompression applied to a freshly fetched image before it is stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Recompression {
    /// Re-encode as JPEG at the given quality on a 0.0-1.0 scale.
    Jpeg {
        /// Lossy quality factor, clamped to 0.0-1.0.
        quality: f32,
    },
    /// Store the decoded image exactly as fetched.
    Off,
}

impl Recompression {
    /// Default JPEG quality factor.
    pub const DEFAULT_QUALITY: f32 = 0.4;
}

impl Default for Recompression {
    fn default() -> Self {
        Self::Jpeg {
            quality: Self::DEFAULT_QUALITY,
        }
    }
}

/// Configuration for [`ImageCache`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCacheConfig {
    /// Maximum number of stored images; `None` means unbounded.
    pub capacity: Option<NonZeroUsize>,
    /// Recompression policy for stored images.
    pub recompression: Recompression,
}

impl ImageCacheConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a capacity bound.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: Option<NonZeroUsize>) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the recompression policy.
    #[must_use]
    pub const fn with_recompression(mut self, recompression: Recompression) -> Self {
        self.recompression = recompression;
        self
    }
}

/// Cache from image key to decoded image, filled on demand over the network.
///
/// Construct one per application context and inject it wherever image lookups
/// are needed; the fetcher is a port so tests can script the network. All
/// shared state is lock-guarded and safe under concurrent `get` calls.
pub struct ImageCache {
    store: Arc<MemoryImageCache>,
    fetcher: Arc<dyn ImageFetcherPort>,
    in_flight: Arc<Mutex<HashMap<ImageKey, InFlight>>>,
    recompression: Recompression,
}

impl ImageCache {
    /// Creates a cache with the default configuration.
    #[must_use]
    pub fn new(fetcher: Arc<dyn ImageFetcherPort>) -> Self {
        Self::with_config(fetcher, ImageCacheConfig::default())
    }

    /// Creates a cache with a custom configuration.
    #[must_use]
    pub fn with_config(fetcher: Arc<dyn ImageFetcherPort>, config: ImageCacheConfig) -> Self {
        Self {
            store: Arc::new(MemoryImageCache::with_capacity(config.capacity)),
            fetcher,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
            recompression: config.recompression,
        }
    }

    /// Returns the cached image for `key`, fetching and storing it on a miss.
    ///
    /// At most one fetch is in flight per key: concurrent callers for the
    /// same missing key await the same result. Failures are returned to every
    /// waiter and never stored, so the next `get` retries from scratch.
    ///
    /// # Errors
    /// Returns the [`FetchError`] of this attempt when the key was a miss and
    /// the fetch or decode failed.
    pub async fn get(&self, key: &ImageKey) -> LoadResult {
        if let Some(img) = self.store.get(key).await {
            return Ok(img);
        }

        let flight = self.join_flight(key).await;
        flight.await
    }

    /// Returns the in-flight fetch for `key`, starting one if none exists.
    /// The map lock is never held across the fetch itself.
    async fn join_flight(&self, key: &ImageKey) -> InFlight {
        let mut in_flight = self.in_flight.lock().await;
        if let Some(existing) = in_flight.get(key) {
            trace!(key = %key, "Joining in-flight fetch");
            return existing.clone();
        }

        let flight = Self::fetch_and_store(
            Arc::clone(&self.store),
            Arc::clone(&self.fetcher),
            Arc::clone(&self.in_flight),
            key.clone(),
            self.recompression,
        )
        .boxed()
        .shared();
        in_flight.insert(key.clone(), flight.clone());
        flight
    }

    /// Returns cache statistics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.store.stats()
    }

    /// Returns the current number of stored images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Removes a stored image.
    pub async fn evict(&self, key: &ImageKey) {
        self.store.evict(key).await;
    }

    /// Clears all stored images.
    pub async fn clear(&self) {
        self.store.clear().await;
    }

    /// Downloads, decodes and stores the image for `key`, then retires the
    /// in-flight entry. Only the table mutates on success; on failure nothing
    /// is stored.
    async fn fetch_and_store(
        store: Arc<MemoryImageCache>,
        fetcher: Arc<dyn ImageFetcherPort>,
        in_flight: Arc<Mutex<HashMap<ImageKey, InFlight>>>,
        key: ImageKey,
        recompression: Recompression,
    ) -> LoadResult {
        let result = async {
            let bytes = fetcher.fetch(&key).await?;
            debug!(key = %key, bytes = bytes.len(), "Downloaded image");

            let img = Self::decode_and_recompress(bytes, recompression).await?;
            let img = Arc::new(img);
            store.put(key.clone(), Arc::clone(&img)).await;
            Ok(img)
        }
        .await;

        in_flight.lock().await.remove(&key);

        if let Err(error) = &result {
            warn!(key = %key, error = %error, "Image fetch failed");
        }
        result
    }

    /// Decodes the body off the async runtime and applies the recompression
    /// policy.
    async fn decode_and_recompress(
        bytes: Bytes,
        recompression: Recompression,
    ) -> Result<DynamicImage, FetchError> {
        tokio::task::spawn_blocking(move || {
            let img =
                image::load_from_memory(&bytes).map_err(|e| FetchError::decode(e.to_string()))?;
            Ok(match recompression {
                Recompression::Off => img,
                Recompression::Jpeg { quality } => recompress_jpeg(img, quality),
            })
        })
        .await
        .map_err(|e| FetchError::unknown(format!("decode task failed: {e}")))?
    }
}

/// Re-encodes the image as JPEG at the given quality and decodes it back.
/// Falls back to the original image when re-encoding fails, so a successful
/// fetch is never lost to the compression step.
fn recompress_jpeg(img: DynamicImage, quality: f32) -> DynamicImage {
    let quality = (quality.clamp(0.0, 1.0) * 100.0).round().clamp(1.0, 100.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let quality = quality as u8;

    let rgb = img.to_rgb8();
    let mut encoded = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut encoded, quality);
    if rgb.write_with_encoder(encoder).is_err() {
        return img;
    }

    image::load_from_memory_with_format(&encoded, image::ImageFormat::Jpeg).unwrap_or(img)
}

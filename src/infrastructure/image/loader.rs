//! Per-surface image load adapter.
//!
//! A loader is bound to one key for its whole life and publishes the latest
//! completion into a watch cell that a display surface can observe. It holds
//! no UI types: the observable is a plain [`LoadState`].

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use super::cache::ImageCache;
use crate::domain::entities::{ImageKey, LoadState};

/// Loads one image through an [`ImageCache`] and exposes the result as
/// observable state.
///
/// `load` is an idempotent trigger: invoking it again (a surface remounting,
/// a manual retry after failure) issues a fresh, independent cache lookup,
/// and the last completion wins. There is no cancellation; if every observer
/// is gone when a load completes, the published state is simply never read.
pub struct ImageLoader {
    key: ImageKey,
    cache: Arc<ImageCache>,
    state_tx: watch::Sender<LoadState>,
    state_rx: watch::Receiver<LoadState>,
}

impl ImageLoader {
    /// Creates a loader bound to `key`. The binding is permanent.
    #[must_use]
    pub fn new(key: impl Into<ImageKey>, cache: Arc<ImageCache>) -> Self {
        let (state_tx, state_rx) = watch::channel(LoadState::Pending);
        Self {
            key: key.into(),
            cache,
            state_tx,
            state_rx,
        }
    }

    /// The key this loader is bound to.
    #[must_use]
    pub fn key(&self) -> &ImageKey {
        &self.key
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> LoadState {
        self.state_rx.borrow().clone()
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state_rx.clone()
    }

    /// Triggers a load in the background and returns immediately.
    pub fn load(&self) {
        let cache = Arc::clone(&self.cache);
        let key = self.key.clone();
        let state_tx = self.state_tx.clone();

        tokio::spawn(async move {
            let state = Self::run(&cache, &key).await;
            let _ = state_tx.send(state);
        });
    }

    /// Triggers a load and waits for its completion, publishing it as well.
    pub async fn load_and_wait(&self) -> LoadState {
        let state = Self::run(&self.cache, &self.key).await;
        let _ = self.state_tx.send(state.clone());
        state
    }

    async fn run(cache: &ImageCache, key: &ImageKey) -> LoadState {
        match cache.get(key).await {
            Ok(img) => LoadState::Resolved(img),
            Err(error) => {
                debug!(key = %key, error = %error, "Image load failed");
                LoadState::Failed(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use bytes::Bytes;
    use image::{DynamicImage, Rgb, RgbImage};

    use crate::domain::errors::FetchError;
    use crate::domain::ports::ImageFetcherPort;
    use crate::domain::ports::mocks::ScriptedImageFetcher;

    fn png_bytes(width: u32, height: u32) -> Bytes {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([10, 120, 80])));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        Bytes::from(buf)
    }

    fn cache_with(fetcher: &Arc<ScriptedImageFetcher>) -> Arc<ImageCache> {
        Arc::new(ImageCache::new(
            Arc::clone(fetcher) as Arc<dyn ImageFetcherPort>
        ))
    }

    #[tokio::test]
    async fn test_starts_pending() {
        let fetcher = Arc::new(ScriptedImageFetcher::always(png_bytes(4, 4)));
        let loader = ImageLoader::new("https://example.test/a.jpg", cache_with(&fetcher));

        assert!(loader.state().is_pending());
        assert_eq!(fetcher.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_load_publishes_resolved_state() {
        let fetcher = Arc::new(ScriptedImageFetcher::always(png_bytes(50, 50)));
        let loader = ImageLoader::new("https://example.test/a.jpg", cache_with(&fetcher));
        let mut rx = loader.subscribe();

        loader.load();
        rx.changed().await.unwrap();

        let state = rx.borrow().clone();
        assert!(state.is_resolved());
        assert_eq!(state.image().unwrap().width(), 50);
    }

    #[tokio::test]
    async fn test_repeated_loads_hit_the_cache() {
        let fetcher = Arc::new(ScriptedImageFetcher::always(png_bytes(8, 8)));
        let loader = ImageLoader::new("https://example.test/a.jpg", cache_with(&fetcher));

        let first = loader.load_and_wait().await;
        let second = loader.load_and_wait().await;

        assert!(first.is_resolved());
        assert!(second.is_resolved());
        assert_eq!(fetcher.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_failure_then_manual_retry_succeeds() {
        let fetcher = Arc::new(ScriptedImageFetcher::new(vec![
            Err(FetchError::timeout()),
            Ok(png_bytes(8, 8)),
        ]));
        let loader = ImageLoader::new("https://example.test/a.jpg", cache_with(&fetcher));

        let first = loader.load_and_wait().await;
        assert!(first.is_failed());
        assert!(loader.state().is_failed());

        // The failure was not cached, so the retry fetches again and wins.
        let second = loader.load_and_wait().await;
        assert!(second.is_resolved());
        assert!(loader.state().is_resolved());
        assert_eq!(fetcher.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_state_persists_until_next_completion() {
        let fetcher = Arc::new(ScriptedImageFetcher::new(vec![Err(
            FetchError::not_connected(),
        )]));
        let loader = ImageLoader::new("https://example.test/a.jpg", cache_with(&fetcher));

        let _ = loader.load_and_wait().await;

        // No retry timer: the failed state stays put until load is invoked.
        assert!(loader.state().is_failed());
        assert_eq!(fetcher.fetch_count(), 1);
    }
}

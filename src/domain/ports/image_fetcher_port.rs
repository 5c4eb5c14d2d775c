//! Port definition for fetching raw image bytes.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::entities::ImageKey;
use crate::domain::errors::FetchError;

/// Port for downloading the raw bytes behind an image key.
///
/// The key is an opaque absolute URL; implementations must not mutate shared
/// state and must be safe to call concurrently for different keys.
#[async_trait]
pub trait ImageFetcherPort: Send + Sync {
    /// Fetches the resource at `key`. Success is a 2xx response body;
    /// everything else maps onto the [`FetchError`] taxonomy.
    async fn fetch(&self, key: &ImageKey) -> Result<Bytes, FetchError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Scripted fetcher double: replays queued responses in order, then a
    /// fallback body if one is set, and counts how many fetches actually
    /// reached it.
    pub struct ScriptedImageFetcher {
        responses: Mutex<VecDeque<Result<Bytes, FetchError>>>,
        fallback: Option<Bytes>,
        fetch_count: AtomicUsize,
        delay: Option<Duration>,
    }

    impl ScriptedImageFetcher {
        /// Creates a fetcher that replays `responses` front to back.
        pub fn new(responses: Vec<Result<Bytes, FetchError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                fallback: None,
                fetch_count: AtomicUsize::new(0),
                delay: None,
            }
        }

        /// Creates a fetcher that always succeeds with the same body.
        pub fn always(body: Bytes) -> Self {
            Self {
                responses: Mutex::new(VecDeque::new()),
                fallback: Some(body),
                fetch_count: AtomicUsize::new(0),
                delay: None,
            }
        }

        /// Adds an artificial latency before each response, to widen race
        /// windows in concurrency tests.
        #[must_use]
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        /// Number of fetches performed so far.
        pub fn fetch_count(&self) -> usize {
            self.fetch_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ImageFetcherPort for ScriptedImageFetcher {
        async fn fetch(&self, _key: &ImageKey) -> Result<Bytes, FetchError> {
            self.fetch_count.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            let next = self.responses.lock().unwrap().pop_front();
            match next {
                Some(response) => response,
                None => match &self.fallback {
                    Some(body) => Ok(body.clone()),
                    None => Err(FetchError::unknown("scripted fetcher exhausted")),
                },
            }
        }
    }
}

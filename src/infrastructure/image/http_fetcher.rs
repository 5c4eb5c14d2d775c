//! HTTP adapter for fetching image bytes.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::trace;

use crate::domain::entities::ImageKey;
use crate::domain::errors::FetchError;
use crate::domain::ports::ImageFetcherPort;

/// Default per-request timeout (connection establishment).
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default whole-resource timeout.
pub const DEFAULT_RESOURCE_TIMEOUT: Duration = Duration::from_secs(60);

/// Timeouts for [`HttpImageFetcher`].
#[derive(Debug, Clone, Copy)]
pub struct HttpImageFetcherConfig {
    /// Bound on establishing the connection for one request.
    pub request_timeout: Duration,
    /// Bound on retrieving the entire resource.
    pub resource_timeout: Duration,
}

impl Default for HttpImageFetcherConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            resource_timeout: DEFAULT_RESOURCE_TIMEOUT,
        }
    }
}

/// Downloads image bytes over HTTPS with a shared, reusable client.
///
/// The client is constructed once and never mutated, so a single fetcher can
/// serve any number of concurrent fetches.
pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    /// Creates a fetcher with the default timeouts.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_config(HttpImageFetcherConfig::default())
    }

    /// Creates a fetcher with custom timeouts.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_config(config: HttpImageFetcherConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .connect_timeout(config.request_timeout)
            .timeout(config.resource_timeout)
            .build()
            .map_err(|e| FetchError::unknown(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

fn map_transport_error(error: &reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::timeout()
    } else if error.is_connect() {
        FetchError::not_connected()
    } else {
        FetchError::unknown(error.to_string())
    }
}

#[async_trait]
impl ImageFetcherPort for HttpImageFetcher {
    async fn fetch(&self, key: &ImageKey) -> Result<Bytes, FetchError> {
        trace!(key = %key, "Downloading image");

        let response = self
            .client
            .get(key.as_str())
            .send()
            .await
            .map_err(|e| map_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::invalid_response(status.as_u16()));
        }

        response.bytes().await.map_err(|e| map_transport_error(&e))
    }
}

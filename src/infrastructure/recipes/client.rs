//! TheMealDB HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::{debug, warn};

use super::dto;
use crate::domain::entities::{Recipe, RecipeSummary};
use crate::domain::errors::ApiError;
use crate::domain::ports::RecipeApiPort;
use crate::infrastructure::config::ApiConfig;

const MEALDB_API_BASE: &str = "https://www.themealdb.com/api/json/v1/1";

/// Per-request timeout for the recipe endpoints.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// TheMealDB recipe API client.
pub struct MealDbClient {
    client: Client,
    base_url: String,
}

impl MealDbClient {
    /// Creates a new client against the public API.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_base_url(MEALDB_API_BASE)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::build(base_url.into(), REQUEST_TIMEOUT)
    }

    /// Creates a client from application configuration.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::build(
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn build(base_url: String, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::unknown(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    fn list_url(&self) -> String {
        format!("{}/filter.php?c=Dessert", self.base_url)
    }

    fn detail_url(&self, id: &str) -> String {
        format!("{}/lookup.php?i={id}", self.base_url)
    }

    async fn get_bytes(&self, url: &str) -> Result<Bytes, ApiError> {
        debug!(url, "Fetching recipe data");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(error = %e, "Recipe request failed");
            if e.is_timeout() {
                ApiError::Timeout
            } else if e.is_connect() {
                ApiError::NotConnected
            } else {
                ApiError::unknown(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Recipe endpoint returned an error status");
            return Err(ApiError::invalid_response(status.as_u16()));
        }

        response
            .bytes()
            .await
            .map_err(|e| ApiError::unknown(format!("failed to read body: {e}")))
    }
}

#[async_trait]
impl RecipeApiPort for MealDbClient {
    async fn fetch_list(&self) -> Result<Bytes, ApiError> {
        self.get_bytes(&self.list_url()).await
    }

    async fn fetch_detail(&self, id: &str) -> Result<Bytes, ApiError> {
        self.get_bytes(&self.detail_url(id)).await
    }

    fn decode_list(&self, body: &[u8]) -> Result<Vec<RecipeSummary>, ApiError> {
        dto::decode_list(body)
    }

    fn decode_detail(&self, body: &[u8]) -> Result<Recipe, ApiError> {
        dto::decode_detail(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = MealDbClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_endpoint_urls() {
        let client = MealDbClient::with_base_url("https://api.test/v1").unwrap();

        assert_eq!(client.list_url(), "https://api.test/v1/filter.php?c=Dessert");
        assert_eq!(
            client.detail_url("52893"),
            "https://api.test/v1/lookup.php?i=52893"
        );
    }

    #[test]
    fn test_client_from_config() {
        let config = ApiConfig {
            base_url: "https://api.test/v1".to_string(),
            timeout_secs: 5,
        };
        let client = MealDbClient::from_config(&config).unwrap();

        assert_eq!(client.list_url(), "https://api.test/v1/filter.php?c=Dessert");
    }
}

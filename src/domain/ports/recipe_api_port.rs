//! Port definition for the recipe API.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::entities::{Recipe, RecipeSummary};
use crate::domain::errors::ApiError;

/// Port for the two-endpoint recipe API.
///
/// Fetch and decode are separate operations, as in the upstream service
/// contract: fetches are network calls, decodes are pure and run on whatever
/// bytes the caller holds. Test doubles only need to script the fetches.
#[async_trait]
pub trait RecipeApiPort: Send + Sync {
    /// Fetches the raw JSON body of the dessert list endpoint.
    async fn fetch_list(&self) -> Result<Bytes, ApiError>;

    /// Fetches the raw JSON body of the detail endpoint for `id`.
    async fn fetch_detail(&self, id: &str) -> Result<Bytes, ApiError>;

    /// Decodes a list response body into summary rows.
    fn decode_list(&self, body: &[u8]) -> Result<Vec<RecipeSummary>, ApiError>;

    /// Decodes a detail response body into a full recipe.
    fn decode_detail(&self, body: &[u8]) -> Result<Recipe, ApiError>;
}

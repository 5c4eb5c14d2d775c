//! Recipe browsing use case.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::{Recipe, RecipeSummary};
use crate::domain::errors::ApiError;
use crate::domain::ports::RecipeApiPort;

/// Fetches and decodes recipes for the list and detail screens.
///
/// This is the view models' logic without the views: fetch the raw body,
/// decode it, hand the entities to whoever is rendering. List order is the
/// API's order.
#[derive(Clone)]
pub struct BrowseRecipesUseCase {
    api: Arc<dyn RecipeApiPort>,
}

impl BrowseRecipesUseCase {
    /// Creates a new use case over the given API port.
    #[must_use]
    pub const fn new(api: Arc<dyn RecipeApiPort>) -> Self {
        Self { api }
    }

    /// Fetches the dessert list.
    ///
    /// # Errors
    /// Returns error if the fetch or the decode fails.
    pub async fn list_desserts(&self) -> Result<Vec<RecipeSummary>, ApiError> {
        debug!("Fetching dessert list");

        let body = self.api.fetch_list().await.map_err(|e| {
            warn!(error = %e, "Dessert list fetch failed");
            e
        })?;
        let recipes = self.api.decode_list(&body)?;

        info!(count = recipes.len(), "Dessert list loaded");
        Ok(recipes)
    }

    /// Fetches the full recipe behind a list row.
    ///
    /// # Errors
    /// Returns error if the fetch or the decode fails.
    pub async fn recipe_detail(&self, id: &str) -> Result<Recipe, ApiError> {
        debug!(id, "Fetching recipe detail");

        let body = self.api.fetch_detail(id).await.map_err(|e| {
            warn!(id, error = %e, "Recipe detail fetch failed");
            e
        })?;
        let recipe = self.api.decode_detail(&body)?;

        debug!(id, name = %recipe.name, "Recipe detail loaded");
        Ok(recipe)
    }
}

//! Wire structures for the TheMealDB JSON schema.
//!
//! The schema is fixed upstream: list rows are three-field objects, detail
//! rows flatten their ingredient list into twenty numbered string slots.
//! Decoding collects the slots in order and skips blanks, so domain entities
//! only ever see the populated pairs.

use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::entities::{Recipe, RecipeSummary};
use crate::domain::errors::ApiError;

/// Number of ingredient/measure slots in a detail row.
const INGREDIENT_SLOTS: usize = 20;

#[derive(Debug, Deserialize)]
struct ListResponse {
    meals: Vec<SummaryDto>,
}

#[derive(Debug, Deserialize)]
struct SummaryDto {
    #[serde(rename = "idMeal")]
    id: String,
    #[serde(rename = "strMeal")]
    name: String,
    #[serde(rename = "strMealThumb")]
    thumbnail: String,
}

#[derive(Debug, Deserialize)]
struct DetailResponse {
    meals: Option<Vec<RecipeDto>>,
}

#[derive(Debug, Deserialize)]
struct RecipeDto {
    #[serde(rename = "idMeal")]
    id: String,
    #[serde(rename = "strMeal")]
    name: String,
    #[serde(rename = "strCategory")]
    category: String,
    #[serde(rename = "strArea")]
    area: String,
    #[serde(rename = "strInstructions")]
    instructions: String,
    #[serde(rename = "strMealThumb")]
    thumbnail: String,
    #[serde(rename = "strTags")]
    tags: Option<String>,
    #[serde(rename = "strYoutube")]
    youtube: Option<String>,
    #[serde(rename = "strSource")]
    source: Option<String>,
    /// Catch-all for the numbered `strIngredientN`/`strMeasureN` slots.
    #[serde(flatten)]
    slots: HashMap<String, serde_json::Value>,
}

impl RecipeDto {
    fn collect_slots(&self, prefix: &str) -> Vec<String> {
        (1..=INGREDIENT_SLOTS)
            .filter_map(|i| {
                self.slots
                    .get(&format!("{prefix}{i}"))
                    .and_then(serde_json::Value::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(ToString::to_string)
            })
            .collect()
    }
}

impl From<SummaryDto> for RecipeSummary {
    fn from(dto: SummaryDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            thumbnail: dto.thumbnail,
        }
    }
}

impl From<RecipeDto> for Recipe {
    fn from(dto: RecipeDto) -> Self {
        let ingredients = dto.collect_slots("strIngredient");
        let measurements = dto.collect_slots("strMeasure");
        Self {
            id: dto.id,
            name: dto.name,
            category: dto.category,
            area: dto.area,
            instructions: dto.instructions,
            thumbnail: dto.thumbnail,
            tags: dto.tags,
            youtube: dto.youtube,
            source: dto.source,
            ingredients,
            measurements,
        }
    }
}

/// Decodes a list response body into summary rows.
///
/// # Errors
/// Returns [`ApiError::Decoding`] if the body does not match the schema.
pub fn decode_list(body: &[u8]) -> Result<Vec<RecipeSummary>, ApiError> {
    let response: ListResponse =
        serde_json::from_slice(body).map_err(|e| ApiError::decoding(e.to_string()))?;
    Ok(response.meals.into_iter().map(RecipeSummary::from).collect())
}

/// Decodes a detail response body into a full recipe.
///
/// The endpoint wraps its single result in a `meals` array and reports an
/// unknown id as a null array, which surfaces as [`ApiError::InvalidData`].
///
/// # Errors
/// Returns [`ApiError::Decoding`] on schema mismatch, [`ApiError::InvalidData`]
/// when the response carries no recipe.
pub fn decode_detail(body: &[u8]) -> Result<Recipe, ApiError> {
    let response: DetailResponse =
        serde_json::from_slice(body).map_err(|e| ApiError::decoding(e.to_string()))?;
    response
        .meals
        .and_then(|meals| meals.into_iter().next())
        .map(Recipe::from)
        .ok_or_else(|| ApiError::invalid_data("response contains no recipe"))
}

//! Recipe domain entities.

/// One row of the dessert list: just enough to render a list entry and
/// navigate to the detail lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSummary {
    /// Meal identifier used for the detail lookup.
    pub id: String,
    /// Display name of the meal.
    pub name: String,
    /// Absolute URL of the thumbnail image.
    pub thumbnail: String,
}

impl RecipeSummary {
    /// Creates a new summary row.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        thumbnail: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            thumbnail: thumbnail.into(),
        }
    }
}

/// A fully resolved recipe as served by the detail endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    /// Meal identifier.
    pub id: String,
    /// Display name of the meal.
    pub name: String,
    /// Category, e.g. "Dessert".
    pub category: String,
    /// Region of origin.
    pub area: String,
    /// Free-form preparation instructions.
    pub instructions: String,
    /// Absolute URL of the full-size meal image.
    pub thumbnail: String,
    /// Comma-separated tag string when present.
    pub tags: Option<String>,
    /// YouTube link when present.
    pub youtube: Option<String>,
    /// Source article link when present.
    pub source: Option<String>,
    /// Ingredients in slot order, blanks removed.
    pub ingredients: Vec<String>,
    /// Measurements in slot order, blanks removed.
    pub measurements: Vec<String>,
}

impl Recipe {
    /// Pairs each ingredient with its measurement, one `"ingredient: measure"`
    /// line per pair. Unmatched trailing entries on either side are dropped by
    /// the zip, mirroring how the detail screen renders the list.
    #[must_use]
    pub fn ingredient_list(&self) -> String {
        self.ingredients
            .iter()
            .zip(self.measurements.iter())
            .map(|(ingredient, measure)| format!("{ingredient}: {measure}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

//! Domain layer with core business entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{ImageKey, LoadState, Recipe, RecipeSummary};
pub use errors::{ApiError, FetchError};
pub use ports::{ImageFetcherPort, ImageStorePort, RecipeApiPort};

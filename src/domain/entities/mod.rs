//! Entity definitions.

mod image;
mod recipe;

pub use self::image::{ImageKey, ImageSource, LoadState, LoadedImage};
pub use self::recipe::{Recipe, RecipeSummary};

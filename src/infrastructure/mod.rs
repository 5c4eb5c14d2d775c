//! Infrastructure layer with adapters for external services.

/// Configuration management.
pub mod config;
/// Image cache, fetcher and loader.
pub mod image;
/// Recipe API client and wire schema.
pub mod recipes;

pub use self::config::AppConfig;
pub use self::image::{HttpImageFetcher, ImageCache, ImageLoader, MemoryImageCache};
pub use self::recipes::MealDbClient;

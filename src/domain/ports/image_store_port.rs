//! Port definition for the image cache table.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::ImageKey;

/// Port for the key-to-image table behind the cache.
///
/// Implementations must be thread-safe: the table is the only shared mutable
/// state in the image pipeline and is read and written concurrently.
#[async_trait]
pub trait ImageStorePort: Send + Sync {
    /// Attempts to get an image from the table. Returns `None` on a miss.
    async fn get(&self, key: &ImageKey) -> Option<Arc<image::DynamicImage>>;

    /// Stores an image under `key`, replacing any prior value.
    async fn put(&self, key: ImageKey, image: Arc<image::DynamicImage>);

    /// Removes an image from the table.
    async fn evict(&self, key: &ImageKey);

    /// Returns the current number of stored images.
    fn len(&self) -> usize;

    /// Returns true if the table is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears the table.
    async fn clear(&self);
}

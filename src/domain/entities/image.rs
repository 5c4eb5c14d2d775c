//! Domain types for image handling.

use std::sync::Arc;

use crate::domain::errors::FetchError;

/// Cache identity of an image: the canonical string form of its source URL.
///
/// The key is treated as opaque throughout the crate. It is never parsed;
/// collaborators validate URLs before they get here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageKey(String);

impl ImageKey {
    /// Creates a new key from any string-like input.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Returns the key as the URL string it wraps.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ImageKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ImageKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Where an image was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// Served from the in-memory cache.
    Cache,
    /// Downloaded from the network.
    Network,
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cache => write!(f, "cache"),
            Self::Network => write!(f, "network"),
        }
    }
}

/// A decoded image together with its cache identity and provenance.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    /// Cache key the image was loaded under.
    pub key: ImageKey,
    /// Decoded pixel payload.
    pub image: Arc<image::DynamicImage>,
    /// Where the payload came from.
    pub source: ImageSource,
}

/// Observable state of a per-surface image load.
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    /// No completion has been published yet.
    #[default]
    Pending,
    /// The most recent load completed with an image.
    Resolved(Arc<image::DynamicImage>),
    /// The most recent load failed.
    Failed(FetchError),
}

impl LoadState {
    /// Returns true if a load has resolved with an image.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// Returns true if the most recent load failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns true if nothing has completed yet.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns the resolved image, if any.
    #[must_use]
    pub fn image(&self) -> Option<Arc<image::DynamicImage>> {
        match self {
            Self::Resolved(img) => Some(Arc::clone(img)),
            _ => None,
        }
    }
}

//! Image URL resolution for catalog poster and backdrop paths.

use serde::{Deserialize, Serialize};

/// Base URL of the remote image service.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
/// Placeholder returned when an entry has no image path.
pub const DEFAULT_FALLBACK_IMAGE_URL: &str =
    "https://via.placeholder.com/500x750?text=No+Image+Available";
/// Image size token used when callers do not pick one.
pub const DEFAULT_IMAGE_SIZE: &str = "w500";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Resolves relative image paths into absolute URLs.
pub struct ImageUrlResolver {
    /// Image service base URL, without a trailing slash.
    pub base_url: String,
    /// URL returned for missing or blank paths.
    pub fallback_url: String,
    /// Size token used by [`ImageUrlResolver::resolve_default`].
    pub default_size: String,
}

impl Default for ImageUrlResolver {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            fallback_url: DEFAULT_FALLBACK_IMAGE_URL.to_string(),
            default_size: DEFAULT_IMAGE_SIZE.to_string(),
        }
    }
}

impl ImageUrlResolver {
    /// Returns `{base}/{size}{path}`, or the fallback URL when `path` is absent or blank.
    pub fn resolve(&self, path: Option<&str>, size: &str) -> String {
        match path.map(str::trim).filter(|path| !path.is_empty()) {
            Some(path) => format!("{}/{}{}", self.base_url.trim_end_matches('/'), size, path),
            None => self.fallback_url.clone(),
        }
    }

    /// Resolves `path` with the configured default size.
    pub fn resolve_default(&self, path: Option<&str>) -> String {
        self.resolve(path, &self.default_size)
    }
}

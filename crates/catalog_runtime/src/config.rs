//! Runtime configuration: image service, carousel timing, storage keys, and search limits.
//!
//! Every section and field is optional in TOML; anything omitted keeps its default.

use std::time::Duration;

use platform_host::ImageUrlResolver;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default carousel auto-advance period in milliseconds.
pub const DEFAULT_INTERVAL_MS: u64 = 6_000;
/// Default carousel transition settle delay in milliseconds.
pub const DEFAULT_SETTLE_MS: u64 = 500;
/// Default number of trending entries promoted to the featured carousel.
pub const DEFAULT_FEATURED_COUNT: usize = 5;
/// Default maximum number of carousel indicator dots.
pub const DEFAULT_MAX_INDICATORS: usize = 5;
/// Largest page number the remote search will serve.
pub const DEFAULT_MAX_SEARCH_PAGES: u32 = 500;

#[derive(Debug, Error)]
/// Errors raised while loading [`CatalogConfig`].
pub enum ConfigError {
    /// The document is not valid TOML or does not match the config shape.
    #[error("invalid catalog config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value parsed but cannot be used.
    #[error("invalid catalog config value `{field}`: {reason}")]
    Invalid {
        /// Dotted field path.
        field: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Carousel timing and presentation limits.
pub struct CarouselConfig {
    /// Auto-advance period.
    pub interval_ms: u64,
    /// Delay between entering a transition and settling on the target slide.
    pub settle_ms: u64,
    /// Trending entries promoted to the featured carousel on the home view.
    pub featured_count: usize,
    /// Maximum indicator dots rendered under the carousel.
    pub max_indicators: usize,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            settle_ms: DEFAULT_SETTLE_MS,
            featured_count: DEFAULT_FEATURED_COUNT,
            max_indicators: DEFAULT_MAX_INDICATORS,
        }
    }
}

impl CarouselConfig {
    /// Auto-advance period as a [`Duration`].
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Settle delay as a [`Duration`].
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Preference keys used for persisted client state.
pub struct StorageKeys {
    /// Key holding the JSON favorites array.
    pub favorites_key: String,
    /// Key holding the JSON dark-mode boolean.
    pub dark_mode_key: String,
    /// Key holding the last submitted search query.
    pub last_search_key: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            favorites_key: "favorites".to_string(),
            dark_mode_key: "darkMode".to_string(),
            last_search_key: "lastSearch".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Search behavior limits.
pub struct SearchConfig {
    /// Upper bound applied to the page count reported by the remote search.
    pub max_pages: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_SEARCH_PAGES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
/// Top-level runtime configuration.
pub struct CatalogConfig {
    /// Image URL construction.
    pub images: ImageUrlResolver,
    /// Carousel timing.
    pub carousel: CarouselConfig,
    /// Persisted preference keys.
    pub storage: StorageKeys,
    /// Search limits.
    pub search: SearchConfig,
}

impl CatalogConfig {
    /// Parses a TOML document, filling omitted values with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and [`ConfigError::Invalid`] when a timing
    /// or limit value is zero.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.carousel.interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "carousel.interval_ms",
                reason: "must be greater than zero",
            });
        }
        if self.carousel.max_indicators == 0 {
            return Err(ConfigError::Invalid {
                field: "carousel.max_indicators",
                reason: "must be greater than zero",
            });
        }
        if self.search.max_pages == 0 {
            return Err(ConfigError::Invalid {
                field: "search.max_pages",
                reason: "must be greater than zero",
            });
        }
        Ok(())
    }
}

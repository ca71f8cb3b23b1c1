//! Remote-catalog contracts, shared catalog models, and image URL resolution.

mod image;
mod service;
mod types;

pub use image::{
    ImageUrlResolver, DEFAULT_FALLBACK_IMAGE_URL, DEFAULT_IMAGE_BASE_URL, DEFAULT_IMAGE_SIZE,
};
pub use service::{CatalogClient, CatalogFuture, MemoryCatalogClient, NoopCatalogClient};
pub use types::{
    CatalogDetails, CatalogEntry, CatalogId, CatalogPage, Genre, MediaKind, TrendingWindow,
};

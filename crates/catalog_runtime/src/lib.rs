//! Catalog browsing client runtime: application state store, preference persistence, remote
//! fetch orchestration, and the featured-carousel state machine.
//!
//! The reducer in [`reducer`] is pure; every side effect it requests is executed by
//! [`host::CatalogHostContext`] against injected [`platform_host`] services. [`CatalogStore`]
//! drives that loop directly for headless hosts, and [`CatalogProvider`] wires it into Leptos.

pub mod carousel;
pub mod config;
mod effect_executor;
pub mod fetch;
pub mod host;
pub mod model;
pub mod persistence;
pub mod reducer;
pub mod runtime_context;
pub mod store;

pub use carousel::{CarouselEngine, CarouselError, CarouselPhase, CarouselSnapshot};
pub use config::{CarouselConfig, CatalogConfig, ConfigError, SearchConfig, StorageKeys};
pub use host::CatalogHostContext;
pub use model::{CatalogState, FavoriteEntry};
pub use persistence::{
    load_boot_preferences, load_last_search, persist_dark_mode, persist_favorites,
    persist_last_search, BootPreferences,
};
pub use reducer::{reduce_catalog, CatalogAction, RuntimeEffect};
pub use runtime_context::{
    provide_catalog_runtime, use_carousel, use_catalog_runtime, use_featured_carousel,
    CarouselContext, CatalogProvider, CatalogRuntimeContext,
};
pub use store::CatalogStore;

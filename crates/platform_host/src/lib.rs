//! Typed host-domain contracts and shared models used by the catalog runtime and browser adapters.
//!
//! This crate is the API-first boundary for platform services. It exposes the catalog models
//! and remote-client contract, preference storage, the theme marker, and the timer scheduler,
//! while concrete browser adapters live in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod catalog;
pub mod host;
pub mod scheduler;
pub mod storage;
pub mod theme;

pub use catalog::{
    CatalogClient, CatalogDetails, CatalogEntry, CatalogFuture, CatalogId, CatalogPage, Genre,
    ImageUrlResolver, MediaKind, MemoryCatalogClient, NoopCatalogClient, TrendingWindow,
    DEFAULT_FALLBACK_IMAGE_URL, DEFAULT_IMAGE_BASE_URL, DEFAULT_IMAGE_SIZE,
};
pub use host::{HostServices, HostStrategy};
pub use scheduler::{ManualScheduler, NoopScheduler, Scheduler, TimerHandle};
pub use storage::prefs::{
    load_pref_with, save_pref_with, MemoryPrefsStore, NoopPrefsStore, PrefsStore, PrefsStoreFuture,
};
pub use theme::{MemoryThemeMarker, NoopThemeMarker, ThemeMarker};

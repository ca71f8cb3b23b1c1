//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate is the concrete browser-side wiring layer for preference storage, the document
//! theme marker, and window timers. Every adapter compiles on native targets as an inert
//! fallback so the runtime and its tests build without a browser.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod scheduler;
pub mod storage;
pub mod theme;

pub use adapters::{
    build_host_services, host_strategy_name, prefs_store, scheduler, selected_host_strategy,
    theme_marker, PrefsStoreAdapter, SchedulerAdapter, ThemeMarkerAdapter,
};
pub use scheduler::WebScheduler;
pub use storage::local_prefs::WebPrefsStore;
pub use theme::{WebThemeMarker, DARK_THEME_CLASS};

use std::{rc::Rc, time::Duration};

use platform_host::{
    CatalogClient, HostServices, HostStrategy, NoopPrefsStore, NoopScheduler, NoopThemeMarker,
    PrefsStore, PrefsStoreFuture, Scheduler, ThemeMarker, TimerHandle,
};

use crate::{WebPrefsStore, WebScheduler, WebThemeMarker};

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "headless-host")]
    {
        HostStrategy::Headless
    }

    #[cfg(not(feature = "headless-host"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    selected_host_strategy().as_str()
}

/// Adapter enum that erases the concrete preference backend behind [`PrefsStore`].
#[derive(Debug, Clone, Copy)]
pub enum PrefsStoreAdapter {
    /// `localStorage`-backed preferences.
    Browser(WebPrefsStore),
    /// No durable storage.
    Headless(NoopPrefsStore),
}

impl PrefsStore for PrefsStoreAdapter {
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        match self {
            Self::Browser(store) => store.load_pref(key),
            Self::Headless(store) => store.load_pref(key),
        }
    }

    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(store) => store.save_pref(key, raw_json),
            Self::Headless(store) => store.save_pref(key, raw_json),
        }
    }

    fn delete_pref<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(store) => store.delete_pref(key),
            Self::Headless(store) => store.delete_pref(key),
        }
    }
}

/// Adapter enum that erases the concrete theme marker behind [`ThemeMarker`].
#[derive(Debug, Clone, Copy)]
pub enum ThemeMarkerAdapter {
    /// Document-root class marker.
    Browser(WebThemeMarker),
    /// No presentation layer to mark.
    Headless(NoopThemeMarker),
}

impl ThemeMarker for ThemeMarkerAdapter {
    fn apply_dark_mode(&self, enabled: bool) {
        match self {
            Self::Browser(marker) => marker.apply_dark_mode(enabled),
            Self::Headless(marker) => marker.apply_dark_mode(enabled),
        }
    }
}

/// Adapter enum that erases the concrete timer backend behind [`Scheduler`].
#[derive(Debug, Clone, Copy)]
pub enum SchedulerAdapter {
    /// `window` timers.
    Browser(WebScheduler),
    /// Timers that never fire.
    Headless(NoopScheduler),
}

impl Scheduler for SchedulerAdapter {
    fn set_interval(&self, period: Duration, callback: Box<dyn FnMut()>) -> TimerHandle {
        match self {
            Self::Browser(scheduler) => scheduler.set_interval(period, callback),
            Self::Headless(scheduler) => scheduler.set_interval(period, callback),
        }
    }

    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerHandle {
        match self {
            Self::Browser(scheduler) => scheduler.set_timeout(delay, callback),
            Self::Headless(scheduler) => scheduler.set_timeout(delay, callback),
        }
    }
}

/// Builds the preferences adapter for the compile-time selected host strategy.
pub fn prefs_store() -> PrefsStoreAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => PrefsStoreAdapter::Browser(WebPrefsStore),
        HostStrategy::Headless => PrefsStoreAdapter::Headless(NoopPrefsStore),
    }
}

/// Builds the theme-marker adapter for the compile-time selected host strategy.
pub fn theme_marker() -> ThemeMarkerAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => ThemeMarkerAdapter::Browser(WebThemeMarker),
        HostStrategy::Headless => ThemeMarkerAdapter::Headless(NoopThemeMarker),
    }
}

/// Builds the timer adapter for the compile-time selected host strategy.
pub fn scheduler() -> SchedulerAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => SchedulerAdapter::Browser(WebScheduler),
        HostStrategy::Headless => SchedulerAdapter::Headless(NoopScheduler),
    }
}

/// Assembles the host bundle for the selected strategy around the caller's catalog client.
///
/// The remote catalog transport is owned by the embedding application, so it is passed in
/// rather than selected here.
pub fn build_host_services(catalog: Rc<dyn CatalogClient>) -> HostServices {
    HostServices {
        prefs: Rc::new(prefs_store()),
        theme: Rc::new(theme_marker()),
        catalog,
        scheduler: Rc::new(scheduler()),
        host_strategy: selected_host_strategy(),
    }
}

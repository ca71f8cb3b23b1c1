//! Host-service bundle injected into the catalog runtime.

use std::rc::Rc;

use crate::{CatalogClient, PrefsStore, Scheduler, ThemeMarker};

/// Host composition selected for the current build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// Browser-backed services (`localStorage`, `document`, `window` timers).
    Browser,
    /// In-process services with no browser (native builds and tests).
    Headless,
}

impl HostStrategy {
    /// Returns a stable string token for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Headless => "headless",
        }
    }
}

/// Runtime-selected host service bundle.
///
/// All environment-specific service selection happens before this bundle crosses into
/// `catalog_runtime`, which keeps the store and carousel decoupled from browser details.
#[derive(Clone)]
pub struct HostServices {
    /// Durable preference storage backing favorites and dark mode.
    pub prefs: Rc<dyn PrefsStore>,
    /// Global theme marker for the presentation layer.
    pub theme: Rc<dyn ThemeMarker>,
    /// Remote catalog client.
    pub catalog: Rc<dyn CatalogClient>,
    /// Event-loop timer service.
    pub scheduler: Rc<dyn Scheduler>,
    /// Stable strategy identifier for diagnostics.
    pub host_strategy: HostStrategy,
}

impl HostServices {
    /// Builds a headless bundle from explicit services.
    pub fn headless(
        prefs: Rc<dyn PrefsStore>,
        theme: Rc<dyn ThemeMarker>,
        catalog: Rc<dyn CatalogClient>,
        scheduler: Rc<dyn Scheduler>,
    ) -> Self {
        Self {
            prefs,
            theme,
            catalog,
            scheduler,
            host_strategy: HostStrategy::Headless,
        }
    }
}

impl Default for HostServices {
    fn default() -> Self {
        Self::headless(
            Rc::new(crate::NoopPrefsStore),
            Rc::new(crate::NoopThemeMarker),
            Rc::new(crate::NoopCatalogClient),
            Rc::new(crate::NoopScheduler),
        )
    }
}

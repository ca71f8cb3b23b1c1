//! Host-side runtime helpers for executing reducer effects against injected platform services.
//!
//! The reducer only names effects; this module performs them through the [`HostServices`]
//! bundle so browser and headless hosts share one execution path.

mod boot;
mod effects;

use std::rc::Rc;

use platform_host::{CatalogClient, HostServices, NoopCatalogClient, PrefsStore, Scheduler};
use platform_host_web::build_host_services;

use crate::config::{CatalogConfig, StorageKeys};

#[derive(Clone)]
/// Host service bundle plus runtime configuration.
pub struct CatalogHostContext {
    services: HostServices,
    config: Rc<CatalogConfig>,
}

impl Default for CatalogHostContext {
    fn default() -> Self {
        Self::new(
            build_host_services(Rc::new(NoopCatalogClient)),
            CatalogConfig::default(),
        )
    }
}

impl CatalogHostContext {
    /// Creates a host context from an injected service bundle.
    pub fn new(services: HostServices, config: CatalogConfig) -> Self {
        Self {
            services,
            config: Rc::new(config),
        }
    }

    /// Preference store backing favorites and dark mode.
    pub fn prefs(&self) -> &dyn PrefsStore {
        self.services.prefs.as_ref()
    }

    /// Remote catalog client.
    pub fn catalog(&self) -> &dyn CatalogClient {
        self.services.catalog.as_ref()
    }

    /// Shared timer scheduler.
    pub fn scheduler(&self) -> Rc<dyn Scheduler> {
        self.services.scheduler.clone()
    }

    /// Runtime configuration.
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Persisted preference keys.
    pub fn storage_keys(&self) -> &StorageKeys {
        &self.config.storage
    }

    /// Stable host strategy token for diagnostics.
    pub fn host_strategy_name(&self) -> &'static str {
        self.services.host_strategy.as_str()
    }
}

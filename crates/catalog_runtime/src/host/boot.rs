use leptos::{logging, spawn_local, Callable, Callback};

use crate::{host::CatalogHostContext, persistence, reducer::CatalogAction};

impl CatalogHostContext {
    /// Loads persisted preferences once and dispatches them as a hydration action.
    pub fn install_boot_hydration(&self, dispatch: Callback<CatalogAction>) {
        let host = self.clone();
        spawn_local(async move {
            let boot = persistence::load_boot_preferences(host.prefs(), host.storage_keys()).await;
            logging::log!(
                "catalog runtime hydrated on {} host: {} favorites, dark mode {}",
                host.host_strategy_name(),
                boot.favorites.len(),
                boot.dark_mode
            );
            dispatch.call(CatalogAction::HydratePreferences {
                favorites: boot.favorites,
                dark_mode: boot.dark_mode,
            });
        });
    }
}

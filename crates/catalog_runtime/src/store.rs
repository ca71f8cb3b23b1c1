//! Owned, non-reactive catalog store for headless hosts and tests.
//!
//! The reactive provider in [`crate::runtime_context`] wraps the same reducer and effect
//! executor in Leptos signals; this type drives them directly.

use crate::{
    host::CatalogHostContext,
    model::CatalogState,
    persistence,
    reducer::{reduce_catalog, CatalogAction, RuntimeEffect},
};

/// Application state plus the host that executes its side effects.
pub struct CatalogStore {
    host: CatalogHostContext,
    state: CatalogState,
    queued: Vec<RuntimeEffect>,
}

impl CatalogStore {
    /// Creates a store with default state and no hydration.
    pub fn new(host: CatalogHostContext) -> Self {
        Self {
            host,
            state: CatalogState::default(),
            queued: Vec::new(),
        }
    }

    /// Creates a store and hydrates favorites and dark mode from the host's preference store.
    pub async fn boot(host: CatalogHostContext) -> Self {
        let mut store = Self::new(host);
        let boot =
            persistence::load_boot_preferences(store.host.prefs(), store.host.storage_keys())
                .await;
        store
            .dispatch(CatalogAction::HydratePreferences {
                favorites: boot.favorites,
                dark_mode: boot.dark_mode,
            })
            .await;
        store
    }

    /// Current state.
    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    /// Host executing this store's effects.
    pub fn host(&self) -> &CatalogHostContext {
        &self.host
    }

    /// Effects emitted by [`CatalogStore::apply`] and not yet flushed.
    pub fn pending_effects(&self) -> &[RuntimeEffect] {
        &self.queued
    }

    /// Applies `action` without running its effects; they queue until [`CatalogStore::flush`].
    pub fn apply(&mut self, action: CatalogAction) -> &CatalogState {
        let effects = reduce_catalog(&mut self.state, action);
        self.queued.extend(effects);
        &self.state
    }

    /// Runs queued effects in emission order against the current state.
    pub async fn flush(&mut self) {
        for effect in std::mem::take(&mut self.queued) {
            self.host.run_runtime_effect(&self.state, effect).await;
        }
    }

    /// Applies `action` and runs its effects before returning.
    pub async fn dispatch(&mut self, action: CatalogAction) {
        self.apply(action);
        self.flush().await;
    }
}

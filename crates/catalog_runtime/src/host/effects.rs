use leptos::{logging, spawn_local};

use crate::{
    host::CatalogHostContext,
    model::CatalogState,
    persistence,
    reducer::RuntimeEffect,
};

impl CatalogHostContext {
    /// Executes one reducer-emitted effect against `state`.
    ///
    /// Write failures are logged and never surface to the caller; in-memory state stays
    /// authoritative for the session.
    pub async fn run_runtime_effect(&self, state: &CatalogState, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::PersistFavorites => {
                if let Err(err) =
                    persistence::persist_favorites(self.prefs(), self.storage_keys(), &state.favorites)
                        .await
                {
                    logging::warn!("persist favorites failed: {err}");
                }
            }
            RuntimeEffect::PersistDarkMode => {
                if let Err(err) =
                    persistence::persist_dark_mode(self.prefs(), self.storage_keys(), state.dark_mode)
                        .await
                {
                    logging::warn!("persist dark mode failed: {err}");
                }
            }
            RuntimeEffect::SyncThemeMarker => self.sync_theme_marker(state),
        }
    }

    /// Executes `effects` against a snapshot of `state`.
    ///
    /// Theme marker syncs apply before this returns. Preference writes keep their emission order
    /// and run on the local executor, so a slow store never holds up the view.
    pub fn spawn_runtime_effects(&self, state: CatalogState, effects: Vec<RuntimeEffect>) {
        let mut writes = Vec::with_capacity(effects.len());
        for effect in effects {
            match effect {
                RuntimeEffect::SyncThemeMarker => self.sync_theme_marker(&state),
                write => writes.push(write),
            }
        }
        if writes.is_empty() {
            return;
        }

        let host = self.clone();
        spawn_local(async move {
            for write in writes {
                host.run_runtime_effect(&state, write).await;
            }
        });
    }

    fn sync_theme_marker(&self, state: &CatalogState) {
        self.services.theme.apply_dark_mode(state.dark_mode);
    }
}

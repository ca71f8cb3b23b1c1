//! Reducer actions, side-effect intents, and transition logic for the catalog store.

use std::collections::HashSet;

use platform_host::{CatalogEntry, MediaKind};

use crate::model::{CatalogState, FavoriteEntry};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_catalog`] to mutate [`CatalogState`].
pub enum CatalogAction {
    /// Replace the popular movie listing.
    SetCatalog {
        /// New listing.
        entries: Vec<CatalogEntry>,
    },
    /// Replace the popular series listing.
    SetSeries {
        /// New listing.
        entries: Vec<CatalogEntry>,
    },
    /// Replace the trending listing.
    SetTrending {
        /// New listing.
        entries: Vec<CatalogEntry>,
    },
    /// Replace the search results.
    SetSearchResults {
        /// New results.
        entries: Vec<CatalogEntry>,
    },
    /// Replace the entry shown on the detail view.
    SetCurrentEntry {
        /// Entry to show, or `None` to clear.
        entry: Option<CatalogEntry>,
    },
    /// Set the in-flight fetch flag.
    SetLoading {
        /// Whether a fetch is in flight.
        loading: bool,
    },
    /// Set or clear the user-facing error message.
    SetError {
        /// Message to show, or `None` to clear.
        message: Option<String>,
    },
    /// Add the entry to favorites, or remove the favorite sharing its id.
    ToggleFavorite {
        /// Entry being toggled.
        entry: CatalogEntry,
        /// Kind to tag the entry with when it is added.
        kind: MediaKind,
    },
    /// Flip dark mode.
    ToggleDarkMode,
    /// Restore persisted preferences at startup.
    HydratePreferences {
        /// Stored favorites.
        favorites: Vec<FavoriteEntry>,
        /// Stored dark-mode flag.
        dark_mode: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_catalog`] for the host layer to execute.
pub enum RuntimeEffect {
    /// Persist the current favorites list.
    PersistFavorites,
    /// Persist the current dark-mode flag.
    PersistDarkMode,
    /// Apply or remove the global dark-theme marker to match state.
    SyncThemeMarker,
}

/// Applies one action to `state` and returns the side effects it requires.
///
/// Every action is accepted; unknown or degenerate payloads never fail. Only preference changes
/// emit effects: toggling a favorite persists favorites, toggling dark mode persists the flag
/// and syncs the theme marker, and hydration syncs the theme marker without writing anything.
pub fn reduce_catalog(state: &mut CatalogState, action: CatalogAction) -> Vec<RuntimeEffect> {
    match action {
        CatalogAction::SetCatalog { entries } => state.catalog_entries = entries,
        CatalogAction::SetSeries { entries } => state.series_entries = entries,
        CatalogAction::SetTrending { entries } => state.trending = entries,
        CatalogAction::SetSearchResults { entries } => state.search_results = entries,
        CatalogAction::SetCurrentEntry { entry } => state.current_entry = entry,
        CatalogAction::SetLoading { loading } => state.loading = loading,
        CatalogAction::SetError { message } => state.error = message,
        CatalogAction::ToggleFavorite { entry, kind } => {
            toggle_favorite(&mut state.favorites, entry, kind);
            return vec![RuntimeEffect::PersistFavorites];
        }
        CatalogAction::ToggleDarkMode => {
            state.dark_mode = !state.dark_mode;
            return vec![RuntimeEffect::PersistDarkMode, RuntimeEffect::SyncThemeMarker];
        }
        CatalogAction::HydratePreferences {
            favorites,
            dark_mode,
        } => {
            state.favorites = dedupe_favorites(favorites);
            state.dark_mode = dark_mode;
            return vec![RuntimeEffect::SyncThemeMarker];
        }
    }
    Vec::new()
}

fn toggle_favorite(favorites: &mut Vec<FavoriteEntry>, entry: CatalogEntry, kind: MediaKind) {
    // An entry without an id never matches, so it is always appended.
    let existing = entry.id.and_then(|id| {
        favorites
            .iter()
            .position(|favorite| favorite.id() == Some(id))
    });
    match existing {
        Some(index) => {
            favorites.remove(index);
        }
        None => favorites.push(FavoriteEntry::new(entry, kind)),
    }
}

fn dedupe_favorites(favorites: Vec<FavoriteEntry>) -> Vec<FavoriteEntry> {
    let mut seen = HashSet::new();
    favorites
        .into_iter()
        .filter(|favorite| favorite.id().map_or(true, |id| seen.insert(id)))
        .collect()
}

//! Preference persistence for favorites, dark mode, and the last search query.
//!
//! Favorites persist as a JSON array of tagged catalog records and dark mode as a JSON boolean,
//! each under its own key. The last search is stored as plain text. Missing or unreadable values
//! fall back to defaults at boot.

use leptos::logging;
use platform_host::{load_pref_with, save_pref_with, PrefsStore};

use crate::{config::StorageKeys, model::FavoriteEntry};

#[derive(Debug, Clone, PartialEq, Default)]
/// Preferences restored at startup.
pub struct BootPreferences {
    /// Stored favorites, or empty when absent or malformed.
    pub favorites: Vec<FavoriteEntry>,
    /// Stored dark-mode flag, or `false` when absent or malformed.
    pub dark_mode: bool,
}

/// Loads favorites and dark mode, substituting defaults for anything missing or malformed.
pub async fn load_boot_preferences(prefs: &dyn PrefsStore, keys: &StorageKeys) -> BootPreferences {
    let favorites =
        match load_pref_with::<_, Vec<FavoriteEntry>>(prefs, &keys.favorites_key).await {
            Ok(favorites) => favorites.unwrap_or_default(),
            Err(err) => {
                logging::warn!("stored favorites unreadable, starting empty: {err}");
                Vec::new()
            }
        };

    let dark_mode = match load_pref_with::<_, bool>(prefs, &keys.dark_mode_key).await {
        Ok(dark_mode) => dark_mode.unwrap_or(false),
        Err(err) => {
            logging::warn!("stored dark mode unreadable, using light: {err}");
            false
        }
    };

    BootPreferences {
        favorites,
        dark_mode,
    }
}

/// Persists the full favorites list.
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub async fn persist_favorites(
    prefs: &dyn PrefsStore,
    keys: &StorageKeys,
    favorites: &[FavoriteEntry],
) -> Result<(), String> {
    save_pref_with(prefs, &keys.favorites_key, favorites).await
}

/// Persists the dark-mode flag.
///
/// # Errors
///
/// Returns an error when the store write fails.
pub async fn persist_dark_mode(
    prefs: &dyn PrefsStore,
    keys: &StorageKeys,
    dark_mode: bool,
) -> Result<(), String> {
    save_pref_with(prefs, &keys.dark_mode_key, &dark_mode).await
}

/// Persists the last submitted search query as the bare query text.
///
/// # Errors
///
/// Returns an error when the store write fails.
pub async fn persist_last_search(
    prefs: &dyn PrefsStore,
    keys: &StorageKeys,
    query: &str,
) -> Result<(), String> {
    prefs.save_pref(&keys.last_search_key, query).await
}

/// Loads the last submitted search query.
///
/// Accepts the bare query text and, for values written as JSON strings, unquotes them.
pub async fn load_last_search(prefs: &dyn PrefsStore, keys: &StorageKeys) -> Option<String> {
    match prefs.load_pref(&keys.last_search_key).await {
        Ok(raw) => raw.map(|raw| serde_json::from_str::<String>(&raw).unwrap_or(raw)),
        Err(err) => {
            logging::warn!("load last search failed: {err}");
            None
        }
    }
}

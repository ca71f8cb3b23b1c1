//! Client state model and derived selectors.

use platform_host::{CatalogEntry, CatalogId, MediaKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CatalogEntry", into = "CatalogEntry")]
/// A favorited catalog entry tagged with its media kind.
///
/// Persists as the entry's own JSON object with `media_type` set, so stored favorites stay a
/// plain array of catalog records. Records stored without a tag get their kind inferred from
/// their date fields and default to [`MediaKind::Movie`].
pub struct FavoriteEntry {
    entry: CatalogEntry,
    kind: MediaKind,
}

impl FavoriteEntry {
    /// Tags `entry` with `kind`, overriding any tag it already carries.
    pub fn new(mut entry: CatalogEntry, kind: MediaKind) -> Self {
        entry.kind = Some(kind);
        Self { entry, kind }
    }

    /// Remote identity of the favorited entry.
    pub fn id(&self) -> Option<CatalogId> {
        self.entry.id
    }

    /// Media kind the entry was favorited as.
    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// The favorited entry.
    pub fn entry(&self) -> &CatalogEntry {
        &self.entry
    }
}

impl From<CatalogEntry> for FavoriteEntry {
    fn from(entry: CatalogEntry) -> Self {
        let kind = entry.inferred_kind().unwrap_or(MediaKind::Movie);
        Self::new(entry, kind)
    }
}

impl From<FavoriteEntry> for CatalogEntry {
    fn from(favorite: FavoriteEntry) -> Self {
        favorite.entry
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
/// Single source of truth for the client.
///
/// Listings are opaque pass-through data from the remote catalog. `favorites` holds at most one
/// record per id and keeps insertion order.
pub struct CatalogState {
    /// Popular movie listing.
    pub catalog_entries: Vec<CatalogEntry>,
    /// Popular series listing.
    pub series_entries: Vec<CatalogEntry>,
    /// Favorited entries in insertion order.
    pub favorites: Vec<FavoriteEntry>,
    /// Results of the most recent search.
    pub search_results: Vec<CatalogEntry>,
    /// Trending listing.
    pub trending: Vec<CatalogEntry>,
    /// Entry shown on the detail view.
    pub current_entry: Option<CatalogEntry>,
    /// A fetch is in flight.
    pub loading: bool,
    /// User-facing error message from the last failed fetch.
    pub error: Option<String>,
    /// Dark presentation enabled.
    pub dark_mode: bool,
}

impl CatalogState {
    /// Returns `true` when an entry with `id` is favorited, regardless of kind.
    pub fn is_favorite(&self, id: CatalogId) -> bool {
        self.favorites
            .iter()
            .any(|favorite| favorite.id() == Some(id))
    }

    /// Favorited movies in insertion order.
    pub fn favorite_movies(&self) -> impl Iterator<Item = &FavoriteEntry> + '_ {
        self.favorites_of(MediaKind::Movie)
    }

    /// Favorited series in insertion order.
    pub fn favorite_series(&self) -> impl Iterator<Item = &FavoriteEntry> + '_ {
        self.favorites_of(MediaKind::Series)
    }

    fn favorites_of(&self, kind: MediaKind) -> impl Iterator<Item = &FavoriteEntry> + '_ {
        self.favorites
            .iter()
            .filter(move |favorite| favorite.kind() == kind)
    }
}

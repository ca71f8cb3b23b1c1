//! Catalog data types shared across the remote client contract and the runtime store.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Numeric catalog identity as issued by the remote catalog.
pub type CatalogId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Media kind of a catalog entry. Serialized with the remote catalog's `media_type` tokens.
pub enum MediaKind {
    /// Feature film.
    #[serde(rename = "movie")]
    Movie,
    /// Episodic series.
    #[serde(rename = "tv")]
    Series,
}

impl MediaKind {
    /// Returns the stable token used in routes and persisted data.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "tv",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Trending aggregation window.
pub enum TrendingWindow {
    /// Trending over the last day.
    #[default]
    Day,
    /// Trending over the last week.
    Week,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Genre descriptor returned by the genre listing.
pub struct Genre {
    /// Remote genre id.
    pub id: i64,
    /// Display name.
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
/// Movie or series record as delivered by the remote catalog.
///
/// Display fields are opaque pass-through values: nothing here is validated or normalized, and
/// any field this type does not name is kept in [`CatalogEntry::extra`] so it survives a
/// persistence round trip unchanged.
pub struct CatalogEntry {
    /// Remote identity. `None` for degenerate records, which can never match a favorite.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CatalogId>,
    /// Media kind tag, when the remote payload carries one.
    #[serde(
        rename = "media_type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<MediaKind>,
    /// Movie title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Series name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Poster image path (relative to the image service).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    /// Backdrop image path (relative to the image service).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,
    /// Movie release date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    /// Series first air date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
    /// Average user rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    /// Synopsis text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    /// Genre ids (listing payloads).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genre_ids: Vec<i64>,
    /// Expanded genres (detail payloads only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<Genre>,
    /// Remote fields not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogEntry {
    /// Whether the entry is tagged with `genre_id` in either its listing or detail form.
    pub fn in_genre(&self, genre_id: i64) -> bool {
        self.genre_ids.contains(&genre_id) || self.genres.iter().any(|genre| genre.id == genre_id)
    }

    /// Returns the title for movies or the name for series, whichever is present.
    pub fn display_title(&self) -> Option<&str> {
        self.title.as_deref().or(self.name.as_deref())
    }

    /// Infers the media kind from the explicit tag, then from which date field is present.
    ///
    /// Returns `None` when the entry carries neither a tag nor a date.
    pub fn inferred_kind(&self) -> Option<MediaKind> {
        self.kind.or_else(|| {
            if self.release_date.is_some() {
                Some(MediaKind::Movie)
            } else if self.first_air_date.is_some() {
                Some(MediaKind::Series)
            } else {
                None
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One page of a paginated catalog listing.
pub struct CatalogPage {
    /// Entries on this page.
    #[serde(default)]
    pub results: Vec<CatalogEntry>,
    /// Total number of pages reported by the remote catalog.
    #[serde(default)]
    pub total_pages: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Detail payload: an entry plus its appended videos, credits, and similar titles.
pub struct CatalogDetails {
    /// The entry itself.
    #[serde(flatten)]
    pub entry: CatalogEntry,
}

impl CatalogDetails {
    /// Returns the first YouTube trailer key from the appended `videos` block, if any.
    pub fn trailer_key(&self) -> Option<&str> {
        self.entry
            .extra
            .get("videos")?
            .get("results")?
            .as_array()?
            .iter()
            .find(|video| {
                video.get("type").and_then(Value::as_str) == Some("Trailer")
                    && video.get("site").and_then(Value::as_str) == Some("YouTube")
            })?
            .get("key")?
            .as_str()
    }
}

use std::{rc::Rc, time::Duration};

use catalog_runtime::{
    fetch, CarouselEngine, CarouselPhase, CatalogAction, CatalogConfig, CatalogHostContext,
    CatalogStore, FavoriteEntry, RuntimeEffect,
};
use futures::executor::block_on;
use platform_host::{
    CatalogEntry, HostServices, ManualScheduler, MediaKind, MemoryCatalogClient,
    MemoryPrefsStore, MemoryThemeMarker,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn movie(id: i64) -> CatalogEntry {
    serde_json::from_value(json!({
        "id": id,
        "title": format!("Feature {id}"),
        "release_date": "2020-01-01",
        "media_type": "movie"
    }))
    .expect("movie fixture")
}

fn series(id: i64) -> CatalogEntry {
    serde_json::from_value(json!({
        "id": id,
        "name": format!("Show {id}"),
        "first_air_date": "2019-06-01",
        "media_type": "tv"
    }))
    .expect("series fixture")
}

struct Harness {
    prefs: MemoryPrefsStore,
    theme: MemoryThemeMarker,
    catalog: MemoryCatalogClient,
    scheduler: ManualScheduler,
}

impl Harness {
    fn new() -> Self {
        Self::with_prefs(MemoryPrefsStore::default())
    }

    fn with_prefs(prefs: MemoryPrefsStore) -> Self {
        let mut entries: Vec<CatalogEntry> = (1..=7).map(movie).collect();
        entries.extend((100..=102).map(series));
        Self {
            prefs,
            theme: MemoryThemeMarker::default(),
            catalog: MemoryCatalogClient::new(entries, 20),
            scheduler: ManualScheduler::default(),
        }
    }

    fn host(&self) -> CatalogHostContext {
        self.host_with(CatalogConfig::default())
    }

    fn host_with(&self, config: CatalogConfig) -> CatalogHostContext {
        CatalogHostContext::new(
            HostServices::headless(
                Rc::new(self.prefs.clone()),
                Rc::new(self.theme.clone()),
                Rc::new(self.catalog.clone()),
                Rc::new(self.scheduler.clone()),
            ),
            config,
        )
    }

    fn boot(&self) -> CatalogStore {
        block_on(CatalogStore::boot(self.host()))
    }
}

fn favorite_ids(store: &CatalogStore) -> Vec<Option<i64>> {
    store
        .state()
        .favorites
        .iter()
        .map(FavoriteEntry::id)
        .collect()
}

fn stored_json(prefs: &MemoryPrefsStore, key: &str) -> Value {
    let raw = prefs.raw(key).expect("stored value");
    serde_json::from_str(&raw).expect("stored JSON")
}

#[test]
fn boot_without_stored_preferences_uses_defaults() {
    let harness = Harness::new();
    let store = harness.boot();

    assert!(store.state().favorites.is_empty());
    assert!(!store.state().dark_mode);
    assert!(harness.prefs.writes().is_empty());
    assert_eq!(harness.theme.history(), vec![false]);
}

#[test]
fn boot_restores_stored_preferences_without_rewriting_them() {
    let prefs = MemoryPrefsStore::seeded([
        (
            "favorites",
            r#"[{"id": 3, "title": "Feature 3", "media_type": "movie"},
                {"id": 101, "name": "Show 101", "first_air_date": "2019-06-01"}]"#,
        ),
        ("darkMode", "true"),
    ]);
    let harness = Harness::with_prefs(prefs);
    let store = harness.boot();

    assert_eq!(favorite_ids(&store), vec![Some(3), Some(101)]);
    assert_eq!(
        store.state().favorite_series().map(FavoriteEntry::id).collect::<Vec<_>>(),
        vec![Some(101)]
    );
    assert!(store.state().dark_mode);
    assert!(harness.theme.is_dark());
    assert!(harness.prefs.writes().is_empty());
}

#[test]
fn malformed_stored_favorites_fall_back_to_empty() {
    let harness = Harness::with_prefs(MemoryPrefsStore::seeded([
        ("favorites", "not json"),
        ("darkMode", "true"),
    ]));
    let store = harness.boot();

    assert!(store.state().favorites.is_empty());
    assert!(store.state().dark_mode);
}

#[test]
fn toggling_a_favorite_twice_persists_each_change() {
    let harness = Harness::new();
    let mut store = harness.boot();
    let entry: CatalogEntry =
        serde_json::from_value(json!({"id": 42, "title": "X"})).expect("entry");

    block_on(store.dispatch(CatalogAction::ToggleFavorite {
        entry: entry.clone(),
        kind: MediaKind::Movie,
    }));
    assert_eq!(favorite_ids(&store), vec![Some(42)]);
    assert_eq!(
        stored_json(&harness.prefs, "favorites"),
        json!([{"id": 42, "title": "X", "media_type": "movie"}])
    );

    block_on(store.dispatch(CatalogAction::ToggleFavorite {
        entry,
        kind: MediaKind::Movie,
    }));
    assert!(store.state().favorites.is_empty());
    assert_eq!(stored_json(&harness.prefs, "favorites"), json!([]));
    assert_eq!(harness.prefs.writes_for("favorites").len(), 2);
}

#[test]
fn toggling_distinct_favorites_is_order_independent() {
    let harness = Harness::new();
    let mut forward = harness.boot();
    let mut backward = harness.boot();

    for id in [1, 2] {
        forward.apply(CatalogAction::ToggleFavorite {
            entry: movie(id),
            kind: MediaKind::Movie,
        });
    }
    for id in [2, 1] {
        backward.apply(CatalogAction::ToggleFavorite {
            entry: movie(id),
            kind: MediaKind::Movie,
        });
    }

    let mut forward_ids = favorite_ids(&forward);
    let mut backward_ids = favorite_ids(&backward);
    forward_ids.sort();
    backward_ids.sort();
    assert_eq!(forward_ids, backward_ids);
}

#[test]
fn toggling_dark_mode_twice_writes_alternating_values() {
    let harness = Harness::new();
    let mut store = harness.boot();

    block_on(store.dispatch(CatalogAction::ToggleDarkMode));
    block_on(store.dispatch(CatalogAction::ToggleDarkMode));

    assert!(!store.state().dark_mode);
    assert_eq!(harness.prefs.writes_for("darkMode"), vec!["true", "false"]);
    assert_eq!(harness.theme.history(), vec![false, true, false]);
}

#[test]
fn applied_effects_wait_for_flush() {
    let harness = Harness::new();
    let mut store = harness.boot();

    store.apply(CatalogAction::ToggleDarkMode);
    assert_eq!(
        store.pending_effects(),
        &[RuntimeEffect::PersistDarkMode, RuntimeEffect::SyncThemeMarker]
    );
    assert!(harness.prefs.writes().is_empty());

    block_on(store.flush());
    assert!(store.pending_effects().is_empty());
    assert_eq!(harness.prefs.raw("darkMode"), Some("true".to_string()));
}

#[test]
fn load_home_fills_listings_and_returns_featured_details() {
    let harness = Harness::new();
    let mut store = harness.boot();
    let host = store.host().clone();

    let featured = block_on(fetch::load_home(&host, |action| {
        store.apply(action);
    }));

    assert_eq!(
        featured.iter().map(|entry| entry.id).collect::<Vec<_>>(),
        vec![Some(1), Some(2), Some(3), Some(4), Some(5)]
    );
    assert_eq!(store.state().trending.len(), 7);
    assert_eq!(store.state().catalog_entries.len(), 7);
    assert_eq!(store.state().series_entries.len(), 3);
    assert!(!store.state().loading);
    assert_eq!(store.state().error, None);
    assert!(store.pending_effects().is_empty());

    let calls = harness.catalog.calls();
    assert_eq!(calls.first().map(String::as_str), Some("trending:movie:Day"));
    assert!(calls.contains(&"details:movie:5".to_string()));
    assert_eq!(
        &calls[calls.len() - 2..],
        &["popular:movie:1".to_string(), "popular:tv:1".to_string()]
    );
}

#[test]
fn load_home_failure_sets_message_and_clears_loading() {
    let harness = Harness::new();
    harness.catalog.set_failure(Some("offline"));
    let mut store = harness.boot();
    let host = store.host().clone();

    let featured = block_on(fetch::load_home(&host, |action| {
        store.apply(action);
    }));

    assert!(featured.is_empty());
    assert!(!store.state().loading);
    assert_eq!(
        store.state().error.as_deref(),
        Some(fetch::HOME_LOAD_ERROR)
    );

    harness.catalog.set_failure(None);
    block_on(fetch::load_home(&host, |action| {
        store.apply(action);
    }));
    assert_eq!(store.state().error, None);
}

#[test]
fn blank_search_is_ignored() {
    let harness = Harness::new();
    let mut store = harness.boot();
    let host = store.host().clone();
    let before = store.state().clone();

    let results = block_on(fetch::search_catalog(&host, "   ", 1, |action| {
        store.apply(action);
    }));

    assert_eq!(results, None);
    assert_eq!(store.state(), &before);
    assert!(harness.catalog.calls().is_empty());
}

#[test]
fn search_stores_results_clamps_pages_and_remembers_query() {
    let mut harness = Harness::new();
    harness.catalog = MemoryCatalogClient::new((1..=7).map(movie).collect(), 2);
    let mut config = CatalogConfig::default();
    config.search.max_pages = 3;
    let host = harness.host_with(config);
    let mut store = CatalogStore::new(host.clone());

    let results = block_on(fetch::search_catalog(&host, " feature ", 1, |action| {
        store.apply(action);
    }))
    .expect("search results");

    assert_eq!(results.total_pages, 3);
    assert_eq!(store.state().search_results.len(), 2);
    assert!(!store.state().loading);
    assert_eq!(harness.catalog.calls(), vec!["search:feature:1".to_string()]);
    assert_eq!(
        block_on(catalog_runtime::load_last_search(
            host.prefs(),
            host.storage_keys()
        )),
        Some("feature".to_string())
    );
    assert_eq!(harness.prefs.raw("lastSearch"), Some("feature".to_string()));
}

#[test]
fn search_failure_sets_message() {
    let harness = Harness::new();
    harness.catalog.set_failure(Some("timeout"));
    let mut store = harness.boot();
    let host = store.host().clone();

    let results = block_on(fetch::search_catalog(&host, "alien", 1, |action| {
        store.apply(action);
    }));

    assert_eq!(results, None);
    assert_eq!(store.state().error.as_deref(), Some(fetch::SEARCH_ERROR));
    assert!(harness.prefs.writes_for("lastSearch").is_empty());
}

#[test]
fn popular_listing_targets_kind_specific_slice_and_message() {
    let harness = Harness::new();
    let mut store = harness.boot();
    let host = store.host().clone();

    block_on(fetch::load_popular(&host, MediaKind::Series, 1, |action| {
        store.apply(action);
    }));
    assert_eq!(store.state().series_entries.len(), 3);
    assert!(store.state().catalog_entries.is_empty());

    harness.catalog.set_failure(Some("503"));
    block_on(fetch::load_popular(&host, MediaKind::Series, 2, |action| {
        store.apply(action);
    }));
    assert_eq!(store.state().error.as_deref(), Some(fetch::SERIES_LOAD_ERROR));
    assert_eq!(store.state().series_entries.len(), 3);

    block_on(fetch::load_popular(&host, MediaKind::Movie, 1, |action| {
        store.apply(action);
    }));
    assert_eq!(store.state().error.as_deref(), Some(fetch::MOVIES_LOAD_ERROR));
    assert!(!store.state().loading);
}

#[test]
fn detail_failures_are_logged_not_shown() {
    let harness = Harness::new();
    let mut store = harness.boot();
    let host = store.host().clone();

    let details = block_on(fetch::load_details(&host, MediaKind::Series, 100, |action| {
        store.apply(action);
    }))
    .expect("series details");
    assert_eq!(details.entry.id, Some(100));
    assert_eq!(store.state().current_entry, Some(series(100)));

    let missing = block_on(fetch::load_details(&host, MediaKind::Movie, 999, |action| {
        store.apply(action);
    }));
    assert_eq!(missing, None);
    assert_eq!(store.state().error, None);
    assert_eq!(store.state().current_entry, Some(series(100)));
    assert!(!store.state().loading);
}

#[test]
fn featured_entries_drive_the_carousel() {
    let harness = Harness::new();
    let mut store = harness.boot();
    let host = store.host().clone();
    let featured = block_on(fetch::load_home(&host, |action| {
        store.apply(action);
    }));

    let carousel = CarouselEngine::new(host.scheduler(), host.config().carousel.clone());
    carousel.set_items(featured);
    assert_eq!(carousel.phase(), CarouselPhase::Idle { index: 0 });

    harness.scheduler.advance(Duration::from_secs(6));
    assert_eq!(
        carousel.phase(),
        CarouselPhase::Transitioning { from: 0, to: 1 }
    );
    harness.scheduler.advance(Duration::from_millis(500));
    assert_eq!(carousel.phase(), CarouselPhase::Idle { index: 1 });
    assert_eq!(carousel.current_item().and_then(|entry| entry.id), Some(2));

    drop(carousel);
    assert_eq!(harness.scheduler.pending(), 0);
}

#[test]
fn genre_listing_degrades_to_empty_on_failure() {
    let harness = Harness::new();
    harness.catalog.set_genres(vec![platform_host::Genre {
        id: 28,
        name: "Action".to_string(),
    }]);
    let host = harness.host();

    let genres = block_on(fetch::load_genres(&host));
    assert_eq!(genres.len(), 1);
    assert_eq!(genres[0].name, "Action");

    harness.catalog.set_failure(Some("offline"));
    assert!(block_on(fetch::load_genres(&host)).is_empty());
}

#[test]
fn genre_filter_replaces_the_movie_listing() {
    let tagged = |id: i64, genres: &[i64]| -> CatalogEntry {
        serde_json::from_value(json!({
            "id": id,
            "title": format!("Feature {id}"),
            "media_type": "movie",
            "genre_ids": genres
        }))
        .expect("tagged fixture")
    };
    let mut harness = Harness::new();
    harness.catalog = MemoryCatalogClient::new(
        vec![tagged(1, &[28]), tagged(2, &[35]), tagged(3, &[28, 35])],
        20,
    );
    let mut store = CatalogStore::new(harness.host());
    let host = store.host().clone();

    block_on(fetch::load_popular(&host, MediaKind::Movie, 1, |action| {
        store.apply(action);
    }));
    assert_eq!(store.state().catalog_entries.len(), 3);

    let listing = block_on(fetch::load_movies_by_genre(&host, 35, 1, |action| {
        store.apply(action);
    }))
    .expect("genre listing");
    assert_eq!(listing.total_pages, 1);
    assert_eq!(
        store
            .state()
            .catalog_entries
            .iter()
            .map(|entry| entry.id)
            .collect::<Vec<_>>(),
        vec![Some(2), Some(3)]
    );
    assert_eq!(
        harness.catalog.calls().last().map(String::as_str),
        Some("discover:genre:35:1")
    );

    harness.catalog.set_failure(Some("503"));
    let failed = block_on(fetch::load_movies_by_genre(&host, 28, 2, |action| {
        store.apply(action);
    }));
    assert_eq!(failed, None);
    assert_eq!(store.state().error.as_deref(), Some(fetch::MOVIES_LOAD_ERROR));
    assert_eq!(store.state().catalog_entries.len(), 2);
    assert!(!store.state().loading);
}

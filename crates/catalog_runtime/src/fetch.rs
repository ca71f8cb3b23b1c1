//! Remote fetch orchestration.
//!
//! Each operation brackets its requests with `SetLoading` transitions, clears any stale error
//! before starting, and turns a failed request into a user-facing `SetError` message. Nothing
//! here retries; callers retry by invoking the operation again.

use futures::future::join_all;
use leptos::logging;
use platform_host::{
    CatalogDetails, CatalogEntry, CatalogId, CatalogPage, Genre, MediaKind, TrendingWindow,
};

use crate::{host::CatalogHostContext, persistence, reducer::CatalogAction};

/// Shown when the home view fails to load.
pub const HOME_LOAD_ERROR: &str = "Failed to load content. Please try again.";
/// Shown when a search request fails.
pub const SEARCH_ERROR: &str = "Failed to search movies. Please try again.";
/// Shown when the popular movie listing fails to load.
pub const MOVIES_LOAD_ERROR: &str = "Failed to load movies. Please try again.";
/// Shown when the popular series listing fails to load.
pub const SERIES_LOAD_ERROR: &str = "Failed to load TV shows. Please try again.";

fn begin(dispatch: &mut impl FnMut(CatalogAction)) {
    dispatch(CatalogAction::SetLoading { loading: true });
    dispatch(CatalogAction::SetError { message: None });
}

fn fail(dispatch: &mut impl FnMut(CatalogAction), message: &str) {
    dispatch(CatalogAction::SetError {
        message: Some(message.to_string()),
    });
}

/// Loads the home view: trending, popular movies, and popular series.
///
/// Returns the first `carousel.featured_count` trending movies with full details for the
/// featured carousel. Details are requested concurrently; if any request fails the whole load
/// fails and the featured list is empty.
pub async fn load_home(
    host: &CatalogHostContext,
    mut dispatch: impl FnMut(CatalogAction),
) -> Vec<CatalogEntry> {
    begin(&mut dispatch);
    let mut featured = Vec::new();
    if let Err(err) = fetch_home(host, &mut featured, &mut dispatch).await {
        logging::warn!("home load failed: {err}");
        fail(&mut dispatch, HOME_LOAD_ERROR);
    }
    dispatch(CatalogAction::SetLoading { loading: false });
    featured
}

async fn fetch_home(
    host: &CatalogHostContext,
    featured: &mut Vec<CatalogEntry>,
    dispatch: &mut impl FnMut(CatalogAction),
) -> Result<(), String> {
    let catalog = host.catalog();
    let trending = catalog
        .trending(MediaKind::Movie, TrendingWindow::Day)
        .await?;

    let detail_requests = trending
        .results
        .iter()
        .take(host.config().carousel.featured_count)
        .filter_map(|entry| entry.id)
        .map(|id| catalog.details(MediaKind::Movie, id));
    *featured = join_all(detail_requests)
        .await
        .into_iter()
        .map(|details| details.map(|details| details.entry))
        .collect::<Result<Vec<_>, _>>()?;

    dispatch(CatalogAction::SetTrending {
        entries: trending.results,
    });

    let movies = catalog.popular(MediaKind::Movie, 1).await?;
    dispatch(CatalogAction::SetCatalog {
        entries: movies.results,
    });

    let series = catalog.popular(MediaKind::Series, 1).await?;
    dispatch(CatalogAction::SetSeries {
        entries: series.results,
    });
    Ok(())
}

/// Searches movies and records the query as the last search.
///
/// Blank queries are ignored without touching state and return `None`. The returned page count
/// is clamped to `search.max_pages`.
pub async fn search_catalog(
    host: &CatalogHostContext,
    query: &str,
    page: u32,
    mut dispatch: impl FnMut(CatalogAction),
) -> Option<CatalogPage> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    begin(&mut dispatch);
    let outcome = match host.catalog().search(query, page.max(1)).await {
        Ok(mut results) => {
            results.total_pages = results.total_pages.min(host.config().search.max_pages);
            dispatch(CatalogAction::SetSearchResults {
                entries: results.results.clone(),
            });
            if let Err(err) =
                persistence::persist_last_search(host.prefs(), host.storage_keys(), query).await
            {
                logging::warn!("persist last search failed: {err}");
            }
            Some(results)
        }
        Err(err) => {
            logging::warn!("search for `{query}` failed: {err}");
            fail(&mut dispatch, SEARCH_ERROR);
            None
        }
    };
    dispatch(CatalogAction::SetLoading { loading: false });
    outcome
}

/// Loads one page of popular movies into `catalog_entries` or popular series into
/// `series_entries`.
pub async fn load_popular(
    host: &CatalogHostContext,
    kind: MediaKind,
    page: u32,
    mut dispatch: impl FnMut(CatalogAction),
) -> Option<CatalogPage> {
    begin(&mut dispatch);
    let outcome = match host.catalog().popular(kind, page.max(1)).await {
        Ok(listing) => {
            let entries = listing.results.clone();
            dispatch(match kind {
                MediaKind::Movie => CatalogAction::SetCatalog { entries },
                MediaKind::Series => CatalogAction::SetSeries { entries },
            });
            Some(listing)
        }
        Err(err) => {
            logging::warn!("popular {} load failed: {err}", kind.as_str());
            fail(
                &mut dispatch,
                match kind {
                    MediaKind::Movie => MOVIES_LOAD_ERROR,
                    MediaKind::Series => SERIES_LOAD_ERROR,
                },
            );
            None
        }
    };
    dispatch(CatalogAction::SetLoading { loading: false });
    outcome
}

/// Loads one page of movies tagged with `genre_id` into `catalog_entries`.
///
/// Shares the popular movie listing's slot and failure message; the genre filter replaces that
/// listing rather than narrowing it.
pub async fn load_movies_by_genre(
    host: &CatalogHostContext,
    genre_id: i64,
    page: u32,
    mut dispatch: impl FnMut(CatalogAction),
) -> Option<CatalogPage> {
    begin(&mut dispatch);
    let outcome = match host.catalog().discover_by_genre(genre_id, page.max(1)).await {
        Ok(listing) => {
            dispatch(CatalogAction::SetCatalog {
                entries: listing.results.clone(),
            });
            Some(listing)
        }
        Err(err) => {
            logging::warn!("genre {genre_id} movie listing failed: {err}");
            fail(&mut dispatch, MOVIES_LOAD_ERROR);
            None
        }
    };
    dispatch(CatalogAction::SetLoading { loading: false });
    outcome
}

/// Loads one entry with its appended detail blocks into `current_entry`.
///
/// Failures are logged only; the detail view keeps whatever it showed before.
pub async fn load_details(
    host: &CatalogHostContext,
    kind: MediaKind,
    id: CatalogId,
    mut dispatch: impl FnMut(CatalogAction),
) -> Option<CatalogDetails> {
    dispatch(CatalogAction::SetLoading { loading: true });
    let outcome = match host.catalog().details(kind, id).await {
        Ok(details) => {
            dispatch(CatalogAction::SetCurrentEntry {
                entry: Some(details.entry.clone()),
            });
            Some(details)
        }
        Err(err) => {
            logging::warn!("{} {id} details load failed: {err}", kind.as_str());
            None
        }
    };
    dispatch(CatalogAction::SetLoading { loading: false });
    outcome
}

/// Lists movie genres, or nothing when the request fails.
pub async fn load_genres(host: &CatalogHostContext) -> Vec<Genre> {
    match host.catalog().genres().await {
        Ok(genres) => genres,
        Err(err) => {
            logging::warn!("genre listing failed: {err}");
            Vec::new()
        }
    }
}

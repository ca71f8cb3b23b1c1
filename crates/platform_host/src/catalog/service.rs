//! Remote catalog service contract and in-process adapters.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

use super::types::{
    CatalogDetails, CatalogEntry, CatalogId, CatalogPage, Genre, MediaKind, TrendingWindow,
};

/// Object-safe boxed future used by [`CatalogClient`] async methods.
pub type CatalogFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for the remote media catalog.
///
/// The runtime consumes this contract only; the HTTP transport behind it lives with the host.
pub trait CatalogClient {
    /// Searches movies by free-text query.
    fn search<'a>(
        &'a self,
        query: &'a str,
        page: u32,
    ) -> CatalogFuture<'a, Result<CatalogPage, String>>;

    /// Lists trending entries of one kind over a window.
    fn trending<'a>(
        &'a self,
        kind: MediaKind,
        window: TrendingWindow,
    ) -> CatalogFuture<'a, Result<CatalogPage, String>>;

    /// Loads one entry with its videos, credits, and similar titles appended.
    fn details<'a>(
        &'a self,
        kind: MediaKind,
        id: CatalogId,
    ) -> CatalogFuture<'a, Result<CatalogDetails, String>>;

    /// Lists popular entries of one kind.
    fn popular<'a>(
        &'a self,
        kind: MediaKind,
        page: u32,
    ) -> CatalogFuture<'a, Result<CatalogPage, String>>;

    /// Lists the movie genres.
    fn genres<'a>(&'a self) -> CatalogFuture<'a, Result<Vec<Genre>, String>>;

    /// Lists movies tagged with one genre.
    fn discover_by_genre<'a>(
        &'a self,
        genre_id: i64,
        page: u32,
    ) -> CatalogFuture<'a, Result<CatalogPage, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Catalog adapter that returns empty listings, for hosts without a remote catalog.
pub struct NoopCatalogClient;

fn empty_page() -> CatalogPage {
    CatalogPage {
        results: Vec::new(),
        total_pages: 0,
    }
}

impl CatalogClient for NoopCatalogClient {
    fn search<'a>(
        &'a self,
        _query: &'a str,
        _page: u32,
    ) -> CatalogFuture<'a, Result<CatalogPage, String>> {
        Box::pin(async { Ok(empty_page()) })
    }

    fn trending<'a>(
        &'a self,
        _kind: MediaKind,
        _window: TrendingWindow,
    ) -> CatalogFuture<'a, Result<CatalogPage, String>> {
        Box::pin(async { Ok(empty_page()) })
    }

    fn details<'a>(
        &'a self,
        _kind: MediaKind,
        id: CatalogId,
    ) -> CatalogFuture<'a, Result<CatalogDetails, String>> {
        Box::pin(async move { Err(format!("catalog entry {id} unavailable")) })
    }

    fn popular<'a>(
        &'a self,
        _kind: MediaKind,
        _page: u32,
    ) -> CatalogFuture<'a, Result<CatalogPage, String>> {
        Box::pin(async { Ok(empty_page()) })
    }

    fn genres<'a>(&'a self) -> CatalogFuture<'a, Result<Vec<Genre>, String>> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn discover_by_genre<'a>(
        &'a self,
        _genre_id: i64,
        _page: u32,
    ) -> CatalogFuture<'a, Result<CatalogPage, String>> {
        Box::pin(async { Ok(empty_page()) })
    }
}

#[derive(Debug, Default)]
struct MemoryCatalogInner {
    entries: Vec<CatalogEntry>,
    genres: Vec<Genre>,
    page_size: usize,
    failure: Option<String>,
    calls: Vec<String>,
}

#[derive(Debug, Clone, Default)]
/// In-memory catalog backed by a fixed entry list.
///
/// Listings page through the entries of the requested kind; search matches the display title
/// case-insensitively. A configured failure makes every call return that error.
pub struct MemoryCatalogClient {
    inner: Rc<RefCell<MemoryCatalogInner>>,
}

impl MemoryCatalogClient {
    /// Creates a catalog over `entries`, returning at most `page_size` results per page.
    pub fn new(entries: Vec<CatalogEntry>, page_size: usize) -> Self {
        Self {
            inner: Rc::new(RefCell::new(MemoryCatalogInner {
                entries,
                page_size: page_size.max(1),
                ..MemoryCatalogInner::default()
            })),
        }
    }

    /// Replaces the genre listing.
    pub fn set_genres(&self, genres: Vec<Genre>) {
        self.inner.borrow_mut().genres = genres;
    }

    /// Makes every subsequent call fail with `message`, or succeed again when `None`.
    pub fn set_failure(&self, message: Option<&str>) {
        self.inner.borrow_mut().failure = message.map(str::to_string);
    }

    /// Returns the ordered log of calls made against this catalog.
    pub fn calls(&self) -> Vec<String> {
        self.inner.borrow().calls.clone()
    }

    fn record(&self, call: String) -> Result<(), String> {
        let mut inner = self.inner.borrow_mut();
        inner.calls.push(call);
        inner.failure.clone().map_or(Ok(()), Err)
    }

    fn paged(&self, matches: impl Fn(&CatalogEntry) -> bool, page: u32) -> CatalogPage {
        let inner = self.inner.borrow();
        let filtered: Vec<&CatalogEntry> = inner
            .entries
            .iter()
            .filter(|entry| matches(*entry))
            .collect();
        let page_size = inner.page_size.max(1);
        let total_pages = filtered.len().div_ceil(page_size) as u32;
        let start = (page.max(1) as usize - 1) * page_size;
        CatalogPage {
            results: filtered
                .into_iter()
                .skip(start)
                .take(page_size)
                .cloned()
                .collect(),
            total_pages,
        }
    }
}

impl CatalogClient for MemoryCatalogClient {
    fn search<'a>(
        &'a self,
        query: &'a str,
        page: u32,
    ) -> CatalogFuture<'a, Result<CatalogPage, String>> {
        Box::pin(async move {
            self.record(format!("search:{query}:{page}"))?;
            let needle = query.trim().to_lowercase();
            Ok(self.paged(
                |entry| {
                    entry.inferred_kind() != Some(MediaKind::Series)
                        && entry
                            .display_title()
                            .is_some_and(|title| title.to_lowercase().contains(&needle))
                },
                page,
            ))
        })
    }

    fn trending<'a>(
        &'a self,
        kind: MediaKind,
        window: TrendingWindow,
    ) -> CatalogFuture<'a, Result<CatalogPage, String>> {
        Box::pin(async move {
            self.record(format!("trending:{}:{window:?}", kind.as_str()))?;
            Ok(self.paged(|entry| entry.inferred_kind() == Some(kind), 1))
        })
    }

    fn details<'a>(
        &'a self,
        kind: MediaKind,
        id: CatalogId,
    ) -> CatalogFuture<'a, Result<CatalogDetails, String>> {
        Box::pin(async move {
            self.record(format!("details:{}:{id}", kind.as_str()))?;
            let found = self
                .inner
                .borrow()
                .entries
                .iter()
                .find(|entry| entry.id == Some(id) && entry.inferred_kind() == Some(kind))
                .cloned();
            found
                .map(|entry| CatalogDetails { entry })
                .ok_or_else(|| format!("catalog entry {id} not found"))
        })
    }

    fn popular<'a>(
        &'a self,
        kind: MediaKind,
        page: u32,
    ) -> CatalogFuture<'a, Result<CatalogPage, String>> {
        Box::pin(async move {
            self.record(format!("popular:{}:{page}", kind.as_str()))?;
            Ok(self.paged(|entry| entry.inferred_kind() == Some(kind), page))
        })
    }

    fn genres<'a>(&'a self) -> CatalogFuture<'a, Result<Vec<Genre>, String>> {
        Box::pin(async move {
            self.record("genres".to_string())?;
            Ok(self.inner.borrow().genres.clone())
        })
    }

    fn discover_by_genre<'a>(
        &'a self,
        genre_id: i64,
        page: u32,
    ) -> CatalogFuture<'a, Result<CatalogPage, String>> {
        Box::pin(async move {
            self.record(format!("discover:genre:{genre_id}:{page}"))?;
            Ok(self.paged(
                |entry| {
                    entry.inferred_kind() == Some(MediaKind::Movie) && entry.in_genre(genre_id)
                },
                page,
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::json;

    use super::*;

    fn entry(id: i64, title: &str, kind: MediaKind) -> CatalogEntry {
        serde_json::from_value(json!({"id": id, "title": title, "media_type": kind}))
            .expect("fixture entry")
    }

    #[test]
    fn memory_catalog_pages_popular_by_kind() {
        let catalog = MemoryCatalogClient::new(
            vec![
                entry(1, "Alien", MediaKind::Movie),
                entry(2, "Arrival", MediaKind::Movie),
                entry(3, "Andor", MediaKind::Series),
                entry(4, "Amelie", MediaKind::Movie),
            ],
            2,
        );
        let client: &dyn CatalogClient = &catalog;

        let first = block_on(client.popular(MediaKind::Movie, 1)).expect("page one");
        let second = block_on(client.popular(MediaKind::Movie, 2)).expect("page two");
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.results.len(), 2);
        assert_eq!(second.results[0].id, Some(4));

        let series = block_on(client.popular(MediaKind::Series, 1)).expect("series");
        assert_eq!(series.results.len(), 1);
    }

    #[test]
    fn memory_catalog_failure_is_reported_and_logged() {
        let catalog = MemoryCatalogClient::new(vec![entry(1, "Alien", MediaKind::Movie)], 10);
        catalog.set_failure(Some("offline"));

        let err = block_on(catalog.search("alien", 1)).expect_err("search should fail");
        assert_eq!(err, "offline");
        assert_eq!(catalog.calls(), vec!["search:alien:1".to_string()]);

        catalog.set_failure(None);
        let page = block_on(catalog.search("ALI", 1)).expect("search");
        assert_eq!(page.results.len(), 1);
    }

    #[test]
    fn memory_catalog_discovers_movies_by_genre() {
        let tagged = |id: i64, kind: MediaKind, genres: &[i64]| -> CatalogEntry {
            serde_json::from_value(json!({
                "id": id,
                "title": format!("Entry {id}"),
                "media_type": kind,
                "genre_ids": genres,
            }))
            .expect("fixture entry")
        };
        let catalog = MemoryCatalogClient::new(
            vec![
                tagged(1, MediaKind::Movie, &[28, 12]),
                tagged(2, MediaKind::Movie, &[35]),
                tagged(3, MediaKind::Series, &[28]),
                tagged(4, MediaKind::Movie, &[28]),
            ],
            10,
        );

        let page = block_on(catalog.discover_by_genre(28, 1)).expect("discover");
        assert_eq!(
            page.results.iter().map(|entry| entry.id).collect::<Vec<_>>(),
            vec![Some(1), Some(4)]
        );
        assert_eq!(catalog.calls(), vec!["discover:genre:28:1".to_string()]);
        assert!(block_on(NoopCatalogClient.discover_by_genre(28, 1))
            .expect("noop")
            .results
            .is_empty());
    }

    #[test]
    fn noop_catalog_is_empty() {
        let client = NoopCatalogClient;
        let page = block_on(client.trending(MediaKind::Movie, TrendingWindow::Day)).expect("ok");
        assert!(page.results.is_empty());
        assert!(block_on(client.details(MediaKind::Movie, 9)).is_err());
    }
}

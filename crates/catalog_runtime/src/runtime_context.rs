//! Runtime provider and context wiring for the catalog client.
//!
//! This module owns the long-lived reducer container, the runtime effect queue, and host
//! bootstrap wiring. It also exposes the carousel hook that binds a [`CarouselEngine`] to a view
//! lifetime. Page composition stays with the embedding application.

use leptos::*;
use platform_host::{CatalogEntry, CatalogId, HostServices, MediaKind};

use crate::{
    carousel::{CarouselEngine, CarouselSnapshot},
    config::CatalogConfig,
    effect_executor, fetch,
    host::CatalogHostContext,
    model::CatalogState,
    reducer::{reduce_catalog, CatalogAction, RuntimeEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading catalog state and dispatching [`CatalogAction`] values.
pub struct CatalogRuntimeContext {
    /// Host service bundle for executing runtime side effects and remote fetches.
    pub host: StoredValue<CatalogHostContext>,
    /// Reactive application state signal.
    pub state: RwSignal<CatalogState>,
    /// Queue of runtime effects emitted by the reducer and drained by the effect executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Featured entries for the home carousel, filled by [`CatalogRuntimeContext::load_home`].
    pub featured: RwSignal<Vec<CatalogEntry>>,
    /// Page count of the most recent successful search.
    pub search_total_pages: RwSignal<u32>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<CatalogAction>,
}

impl CatalogRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: CatalogAction) {
        self.dispatch.call(action);
    }

    /// Adds `entry` to favorites as `kind`, or removes the favorite sharing its id.
    pub fn toggle_favorite(&self, entry: CatalogEntry, kind: MediaKind) {
        self.dispatch_action(CatalogAction::ToggleFavorite { entry, kind });
    }

    /// Flips dark mode.
    pub fn toggle_dark_mode(&self) {
        self.dispatch_action(CatalogAction::ToggleDarkMode);
    }

    /// Reactive favorite membership test.
    pub fn is_favorite(&self, id: CatalogId) -> bool {
        self.state.with(|state| state.is_favorite(id))
    }

    /// Resolves an image path with the configured default size.
    pub fn image_url(&self, path: Option<&str>) -> String {
        self.host
            .with_value(|host| host.config().images.resolve_default(path))
    }

    /// Loads trending, popular movies, popular series, and the featured carousel entries.
    pub fn load_home(&self) {
        let runtime = *self;
        spawn_local(async move {
            let host = runtime.host.get_value();
            let featured =
                fetch::load_home(&host, move |action| runtime.dispatch_action(action)).await;
            runtime.featured.set(featured);
        });
    }

    /// Searches movies; blank queries are ignored.
    pub fn search(&self, query: String, page: u32) {
        let runtime = *self;
        spawn_local(async move {
            let host = runtime.host.get_value();
            let results = fetch::search_catalog(&host, &query, page, move |action| {
                runtime.dispatch_action(action)
            })
            .await;
            if let Some(results) = results {
                runtime.search_total_pages.set(results.total_pages);
            }
        });
    }

    /// Loads one page of popular movies or series.
    pub fn load_popular(&self, kind: MediaKind, page: u32) {
        let runtime = *self;
        spawn_local(async move {
            let host = runtime.host.get_value();
            fetch::load_popular(&host, kind, page, move |action| {
                runtime.dispatch_action(action)
            })
            .await;
        });
    }

    /// Loads one page of movies in `genre_id` into the movie listing.
    pub fn load_movies_by_genre(&self, genre_id: i64, page: u32) {
        let runtime = *self;
        spawn_local(async move {
            let host = runtime.host.get_value();
            fetch::load_movies_by_genre(&host, genre_id, page, move |action| {
                runtime.dispatch_action(action)
            })
            .await;
        });
    }

    /// Loads the detail view entry.
    pub fn load_details(&self, kind: MediaKind, id: CatalogId) {
        let runtime = *self;
        spawn_local(async move {
            let host = runtime.host.get_value();
            fetch::load_details(&host, kind, id, move |action| {
                runtime.dispatch_action(action)
            })
            .await;
        });
    }
}

fn install_runtime_orchestration(runtime: CatalogRuntimeContext) {
    runtime
        .host
        .get_value()
        .install_boot_hydration(runtime.dispatch);
    effect_executor::install(runtime);
}

/// Builds the runtime under the current reactive owner, provides it as context, and starts boot
/// hydration and the effect executor.
///
/// [`CatalogProvider`] calls this for component trees; embedders without a view layer may call it
/// directly inside their own owner.
pub fn provide_catalog_runtime(
    host_services: HostServices,
    config: CatalogConfig,
) -> CatalogRuntimeContext {
    let host = store_value(CatalogHostContext::new(host_services, config));
    let state = create_rw_signal(CatalogState::default());
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());
    let featured = create_rw_signal(Vec::<CatalogEntry>::new());
    let search_total_pages = create_rw_signal(0_u32);

    let dispatch = Callback::new(move |action: CatalogAction| {
        let mut catalog = state.get_untracked();
        let previous = catalog.clone();
        let new_effects = reduce_catalog(&mut catalog, action);
        if catalog != previous {
            state.set(catalog);
        }
        if !new_effects.is_empty() {
            let mut queue = effects.get_untracked();
            queue.extend(new_effects);
            effects.set(queue);
        }
    });

    let runtime = CatalogRuntimeContext {
        host,
        state,
        effects,
        featured,
        search_total_pages,
        dispatch,
    };

    provide_context(runtime);

    install_runtime_orchestration(runtime);

    runtime
}

#[component]
/// Provides [`CatalogRuntimeContext`] to descendant components and boots persisted preferences.
pub fn CatalogProvider(
    /// Injected browser or headless host bundle assembled by the entry layer.
    host_services: HostServices,
    /// Runtime configuration; defaults apply when omitted.
    #[prop(optional)]
    config: Option<CatalogConfig>,
    children: Children,
) -> impl IntoView {
    provide_catalog_runtime(host_services, config.unwrap_or_default());
    children().into_view()
}

/// Returns the current [`CatalogRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`CatalogProvider`].
pub fn use_catalog_runtime() -> CatalogRuntimeContext {
    use_context::<CatalogRuntimeContext>().expect("CatalogRuntimeContext not provided")
}

#[derive(Clone, Copy)]
/// Handle to a carousel bound to the calling view's lifetime.
pub struct CarouselContext {
    /// Reactive carousel state.
    pub snapshot: ReadSignal<CarouselSnapshot>,
    engine: StoredValue<CarouselEngine>,
}

impl CarouselContext {
    /// Advances to the following slide.
    pub fn next(&self) {
        self.engine.try_with_value(CarouselEngine::next);
    }

    /// Moves back to the preceding slide.
    pub fn previous(&self) {
        self.engine.try_with_value(CarouselEngine::previous);
    }

    /// Moves to slide `index`; out-of-range requests are logged and ignored.
    pub fn goto(&self, index: usize) {
        if let Some(Err(err)) = self.engine.try_with_value(|engine| engine.goto(index)) {
            logging::warn!("carousel navigation ignored: {err}");
        }
    }

    /// Reactive accessor for the entry on screen.
    pub fn current_item(&self) -> Option<CatalogEntry> {
        let _ = self.snapshot.get();
        self.engine
            .try_with_value(CarouselEngine::current_item)
            .flatten()
    }

    /// Reactive indicator dot count.
    pub fn indicator_count(&self) -> usize {
        let _ = self.snapshot.get();
        self.engine
            .try_with_value(CarouselEngine::indicator_count)
            .unwrap_or(0)
    }
}

/// Binds a carousel to `items` for the lifetime of the calling view.
///
/// The carousel re-seeds whenever `items` changes and cancels its timers when the view's owner
/// is cleaned up.
///
/// # Panics
///
/// Panics if called outside [`CatalogProvider`].
pub fn use_carousel(items: Signal<Vec<CatalogEntry>>) -> CarouselContext {
    let host = use_catalog_runtime().host.get_value();
    let (snapshot, set_snapshot) = create_signal(CarouselSnapshot::default());

    let engine = CarouselEngine::new(host.scheduler(), host.config().carousel.clone());
    engine.on_change(move |next| set_snapshot.set(*next));
    let engine = store_value(engine);

    create_effect(move |_| {
        let items = items.get();
        engine.with_value(|engine| engine.set_items(items));
    });
    on_cleanup(move || {
        engine.try_with_value(CarouselEngine::unmount);
    });

    CarouselContext { snapshot, engine }
}

/// Binds a carousel to the runtime's featured entries.
///
/// # Panics
///
/// Panics if called outside [`CatalogProvider`].
pub fn use_featured_carousel() -> CarouselContext {
    use_carousel(use_catalog_runtime().featured.into())
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc, time::Duration};

    use platform_host::{ManualScheduler, MemoryCatalogClient, MemoryPrefsStore, MemoryThemeMarker};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    const SETTLE: Duration = Duration::from_millis(500);

    struct Fixture {
        prefs: MemoryPrefsStore,
        theme: MemoryThemeMarker,
        scheduler: ManualScheduler,
    }

    impl Fixture {
        fn new(prefs: MemoryPrefsStore) -> Self {
            Self {
                prefs,
                theme: MemoryThemeMarker::default(),
                scheduler: ManualScheduler::default(),
            }
        }

        fn services(&self) -> HostServices {
            HostServices::headless(
                Rc::new(self.prefs.clone()),
                Rc::new(self.theme.clone()),
                Rc::new(MemoryCatalogClient::new(Vec::new(), 20)),
                Rc::new(self.scheduler.clone()),
            )
        }
    }

    fn entry(id: i64) -> CatalogEntry {
        serde_json::from_value(json!({"id": id, "title": format!("Feature {id}")}))
            .expect("fixture entry")
    }

    type Mounted = (
        RwSignal<Vec<CatalogEntry>>,
        CarouselContext,
        Rc<RefCell<Vec<Option<CatalogId>>>>,
    );

    /// Mounts a runtime plus a carousel view whose rendering effect logs the visible entry id.
    fn mount_carousel_view(services: HostServices) -> (Mounted, Disposer) {
        let mount = as_child_of_current_owner(move |()| {
            provide_catalog_runtime(services.clone(), CatalogConfig::default());
            let items = create_rw_signal(Vec::<CatalogEntry>::new());
            let carousel = use_carousel(items.into());
            let rendered: Rc<RefCell<Vec<Option<CatalogId>>>> = Rc::default();
            let sink = rendered.clone();
            create_effect(move |_| {
                sink.borrow_mut()
                    .push(carousel.current_item().and_then(|entry| entry.id));
            });
            (items, carousel, rendered)
        });
        mount(())
    }

    #[test]
    fn boot_hydration_restores_preferences_and_syncs_theme() {
        let _ = create_runtime();
        let fixture = Fixture::new(MemoryPrefsStore::seeded([
            (
                "favorites",
                r#"[{"id": 7, "title": "Feature 7", "media_type": "movie"}]"#,
            ),
            ("darkMode", "true"),
        ]));
        let services = fixture.services();
        let mount = as_child_of_current_owner(move |()| {
            provide_catalog_runtime(services.clone(), CatalogConfig::default())
        });
        let (runtime, _owner) = mount(());

        assert!(runtime.state.with_untracked(|state| state.is_favorite(7)));
        assert!(runtime.state.with_untracked(|state| state.dark_mode));
        assert!(runtime.effects.with_untracked(Vec::is_empty));
        assert_eq!(fixture.theme.history(), vec![true]);
        assert!(fixture.prefs.writes().is_empty());
    }

    #[test]
    fn dispatched_toggles_are_persisted_by_the_effect_executor() {
        let _ = create_runtime();
        let fixture = Fixture::new(MemoryPrefsStore::default());
        let services = fixture.services();
        let mount = as_child_of_current_owner(move |()| {
            provide_catalog_runtime(services.clone(), CatalogConfig::default())
        });
        let (runtime, _owner) = mount(());

        runtime.toggle_favorite(entry(42), MediaKind::Movie);
        assert!(runtime.state.with_untracked(|state| state.is_favorite(42)));
        assert_eq!(fixture.prefs.writes_for("favorites").len(), 1);
        assert!(runtime.effects.with_untracked(Vec::is_empty));

        runtime.toggle_dark_mode();
        runtime.toggle_dark_mode();
        assert_eq!(fixture.prefs.writes_for("darkMode"), vec!["true", "false"]);
        assert_eq!(fixture.theme.history(), vec![false, true, false]);
    }

    #[test]
    fn carousel_views_can_read_the_engine_while_it_seeds() {
        let _ = create_runtime();
        let fixture = Fixture::new(MemoryPrefsStore::default());
        let ((items, carousel, rendered), _owner) = mount_carousel_view(fixture.services());
        assert_eq!(*rendered.borrow(), vec![None]);

        items.set(vec![entry(1), entry(2)]);
        assert_eq!(rendered.borrow().last(), Some(&Some(1)));
        assert_eq!(carousel.indicator_count(), 2);

        carousel.next();
        fixture.scheduler.advance(SETTLE);
        assert_eq!(
            carousel.snapshot.get_untracked().phase,
            crate::CarouselPhase::Idle { index: 1 }
        );
        assert_eq!(rendered.borrow().last(), Some(&Some(2)));
    }

    #[test]
    fn disposing_the_view_owner_cancels_carousel_timers() {
        let _ = create_runtime();
        let fixture = Fixture::new(MemoryPrefsStore::default());
        let ((items, carousel, rendered), owner) = mount_carousel_view(fixture.services());

        items.set(vec![entry(1), entry(2), entry(3)]);
        carousel.next();
        assert_eq!(fixture.scheduler.pending(), 2);

        drop(owner);
        assert_eq!(fixture.scheduler.pending(), 0);

        let before = rendered.borrow().len();
        fixture.scheduler.advance(Duration::from_secs(30));
        assert_eq!(rendered.borrow().len(), before);
    }
}

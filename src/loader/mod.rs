//! Incremental, filtered and paginated list loading.
//!
//! [`ListLoader`] fetches one page at a time from a [`ContentApi`] and hands
//! each page to a [`ListRenderer`]. A page shorter than the limit ends the
//! list; changing a filter or the sort rewinds to page 1 and reloads.
//!
//! The loader is built for a single-threaded, cooperative event loop. State
//! lives in a `RefCell` that is never borrowed across an `.await`, so calls
//! may interleave on one thread. `is_loading` suppresses overlapping fetches
//! and every fetch carries the query generation it started in, so a
//! response that lands after a reset is discarded.
//!
//! # Example
//!
//! ```ignore
//! use blogline::{HttpContentGateway, ListLoader, LoaderOptions};
//!
//! let gateway = HttpContentGateway::for_base_url(base, &Default::default())?;
//! let loader = ListLoader::new(gateway, renderer, LoaderOptions::default())?;
//! loader.load_next().await;
//! loader.set_filter("category", "web_development").await;
//! ```

mod renderer;
mod state;

use std::cell::RefCell;

pub use renderer::{ListRenderer, RenderMode};
pub use state::{LoaderPhase, LoaderState};

#[cfg(test)]
pub use renderer::MockListRenderer;

use crate::content::query::validate_limit;
use crate::content::{
    ContentApi, ContentError, ContentId, ContentItem, Filters, ListQuery, SortOrder, SortSpec,
};

/// Page size used by the public blog listing.
pub const DEFAULT_PAGE_LIMIT: u32 = 12;

/// Message shown when the first page of a query is empty.
pub const DEFAULT_EMPTY_MESSAGE: &str = "No content found with the current filters.";

/// Construction options for a [`ListLoader`].
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Items requested per page.
    pub limit: u32,
    /// Initial sort.
    pub sort: SortSpec,
    /// Initial filters.
    pub filters: Filters,
    /// Message passed to [`ListRenderer::show_empty`].
    pub empty_message: String,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            sort: SortSpec::default(),
            filters: Filters::new(),
            empty_message: DEFAULT_EMPTY_MESSAGE.to_owned(),
        }
    }
}

/// Result of one load attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum LoadOutcome {
    /// Nothing was fetched because a load was in flight or the list is
    /// exhausted.
    Skipped,
    /// A page was rendered.
    Loaded {
        /// Number of items in the page.
        items: usize,
        /// Whether the page was the last one.
        exhausted: bool,
    },
    /// The first page was empty and the empty state was shown.
    Empty,
    /// The fetch failed and the error was shown.
    Failed(ContentError),
    /// The response belonged to an older query generation and was dropped.
    Stale,
}

struct FetchTicket {
    generation: u64,
    page: u32,
    query: ListQuery,
}

/// Clears `is_loading` when a fetch settles, unless a reset has already
/// moved the loader to a newer generation.
struct LoadingGuard<'state> {
    state: &'state RefCell<LoaderState>,
    generation: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.try_borrow_mut()
            && state.generation == self.generation
        {
            state.is_loading = false;
        }
    }
}

/// Paginated, filtered list loader over a content API.
pub struct ListLoader<A, R> {
    api: A,
    renderer: R,
    limit: u32,
    empty_message: String,
    state: RefCell<LoaderState>,
}

impl<A, R> ListLoader<A, R>
where
    A: ContentApi,
    R: ListRenderer,
{
    /// Creates a loader positioned before page 1.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidQuery`] when `options.limit` lies
    /// outside `1..=MAX_PAGE_LIMIT`.
    pub fn new(api: A, renderer: R, options: LoaderOptions) -> Result<Self, ContentError> {
        validate_limit(options.limit)?;
        Ok(Self {
            api,
            renderer,
            limit: options.limit,
            empty_message: options.empty_message,
            state: RefCell::new(LoaderState::new(options.filters, options.sort)),
        })
    }

    /// Fetches and renders the next page.
    ///
    /// Does nothing while a fetch is in flight or after the list has been
    /// exhausted.
    pub async fn load_next(&self) -> LoadOutcome {
        let ticket = match self.begin_fetch() {
            Ok(Some(ticket)) => ticket,
            Ok(None) => return LoadOutcome::Skipped,
            Err(error) => return self.fail(error),
        };
        let _guard = LoadingGuard {
            state: &self.state,
            generation: ticket.generation,
        };

        tracing::debug!(
            generation = ticket.generation,
            skip = ticket.query.skip(),
            limit = ticket.query.limit(),
            "fetching content page"
        );
        let result = self.api.list(&ticket.query).await;
        self.complete_fetch(&ticket, result)
    }

    /// Sets or clears one filter, then reloads from page 1.
    ///
    /// The value `all` clears the filter.
    pub async fn set_filter(&self, name: &str, value: &str) -> LoadOutcome {
        self.state.borrow_mut().filters.set(name, value);
        self.reset_and_reload().await
    }

    /// Applies several filter changes with a single reload.
    pub async fn set_filters<I, K, V>(&self, changes: I) -> LoadOutcome
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        {
            let mut state = self.state.borrow_mut();
            for (name, value) in changes {
                state.filters.set(name.as_ref(), value.as_ref());
            }
        }
        self.reset_and_reload().await
    }

    /// Changes the sort, then reloads from page 1.
    ///
    /// A blank field keeps the current field and only changes the order.
    pub async fn set_sort(&self, field: &str, order: SortOrder) -> LoadOutcome {
        {
            let mut state = self.state.borrow_mut();
            let next = if field.trim().is_empty() {
                Ok(state.sort.with_order(order))
            } else {
                SortSpec::new(field, order)
            };
            match next {
                Ok(sort) => state.sort = sort,
                Err(error) => {
                    drop(state);
                    return self.fail(error);
                }
            }
        }
        self.reset_and_reload().await
    }

    /// Reloads from page 1 with unchanged filters and sort.
    pub async fn reload(&self) -> LoadOutcome {
        self.reset_and_reload().await
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> LoaderPhase {
        self.state.borrow().phase()
    }

    /// Next page to fetch (1-based).
    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.state.borrow().current_page()
    }

    /// True while a fetch for the current generation is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// True once a short page has been received.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.state.borrow().is_exhausted()
    }

    /// Query generation; bumped by every reset.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.state.borrow().generation()
    }

    /// Page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Snapshot of the active filters.
    #[must_use]
    pub fn filters(&self) -> Filters {
        self.state.borrow().filters().clone()
    }

    /// Snapshot of the active sort.
    #[must_use]
    pub fn sort(&self) -> SortSpec {
        self.state.borrow().sort().clone()
    }

    /// Snapshot of the items loaded since the last reset.
    #[must_use]
    pub fn cached_items(&self) -> Vec<ContentItem> {
        self.state.borrow().cached_items().to_vec()
    }

    /// Number of items loaded since the last reset.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.state.borrow().cached_items().len()
    }

    /// Returns a copy of a loaded item.
    #[must_use]
    pub fn find_cached(&self, id: &ContentId) -> Option<ContentItem> {
        self.state.borrow().find_cached(id).cloned()
    }

    /// Returns the renderer.
    #[must_use]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    async fn reset_and_reload(&self) -> LoadOutcome {
        let generation = {
            let mut state = self.state.borrow_mut();
            state.reset();
            state.generation
        };
        tracing::debug!(generation, "list query changed, reloading from page 1");
        self.renderer.clear();
        self.load_next().await
    }

    fn begin_fetch(&self) -> Result<Option<FetchTicket>, ContentError> {
        let mut state = self.state.borrow_mut();
        if state.is_loading || state.exhausted {
            return Ok(None);
        }

        let query =
            ListQuery::for_page(state.current_page, self.limit, &state.sort, &state.filters)?;
        state.is_loading = true;
        Ok(Some(FetchTicket {
            generation: state.generation,
            page: state.current_page,
            query,
        }))
    }

    fn complete_fetch(
        &self,
        ticket: &FetchTicket,
        result: Result<Vec<ContentItem>, ContentError>,
    ) -> LoadOutcome {
        let mut state = self.state.borrow_mut();
        if state.generation != ticket.generation {
            tracing::debug!(
                stale_generation = ticket.generation,
                current_generation = state.generation,
                "discarding stale content page"
            );
            return LoadOutcome::Stale;
        }

        let page = match result {
            Ok(page) => page,
            Err(error) => {
                drop(state);
                return self.fail(error);
            }
        };

        let exhausted = usize::try_from(self.limit).is_ok_and(|limit| page.len() < limit);
        state.exhausted = exhausted;
        state.current_page = state.current_page.saturating_add(1);
        state.cache.extend(page.iter().cloned());
        drop(state);

        tracing::info!(
            generation = ticket.generation,
            page = ticket.page,
            items = page.len(),
            exhausted,
            "loaded content page"
        );

        let is_first_page = ticket.page == 1;
        if is_first_page && page.is_empty() {
            self.renderer.show_empty(&self.empty_message);
            return LoadOutcome::Empty;
        }

        let mode = if is_first_page {
            RenderMode::Replace
        } else {
            RenderMode::Append
        };
        self.renderer.render(&page, mode);
        LoadOutcome::Loaded {
            items: page.len(),
            exhausted,
        }
    }

    fn fail(&self, error: ContentError) -> LoadOutcome {
        tracing::warn!(%error, "content page failed to load");
        self.renderer.show_error(&format!("Could not load content: {error}"));
        LoadOutcome::Failed(error)
    }
}

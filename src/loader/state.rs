//! Mutable state owned by a single list loader.

use crate::content::{ContentId, ContentItem, Filters, SortSpec};

/// Observable phase of a loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderPhase {
    /// Ready to fetch the next page.
    Idle,
    /// A fetch for the current generation is in flight.
    Loading,
    /// The last page was short; nothing more to fetch until a reset.
    Exhausted,
}

/// Filter, sort and cursor state for one list.
///
/// `current_page` is 1-based and always names the next page to fetch.
#[derive(Debug, Clone)]
pub struct LoaderState {
    pub(super) filters: Filters,
    pub(super) sort: SortSpec,
    pub(super) current_page: u32,
    pub(super) is_loading: bool,
    pub(super) exhausted: bool,
    pub(super) generation: u64,
    pub(super) cache: Vec<ContentItem>,
}

impl LoaderState {
    /// Creates fresh state for the given filters and sort.
    #[must_use]
    pub const fn new(filters: Filters, sort: SortSpec) -> Self {
        Self {
            filters,
            sort,
            current_page: 1,
            is_loading: false,
            exhausted: false,
            generation: 0,
            cache: Vec::new(),
        }
    }

    /// Current phase derived from the loading and exhaustion flags.
    #[must_use]
    pub const fn phase(&self) -> LoaderPhase {
        if self.is_loading {
            LoaderPhase::Loading
        } else if self.exhausted {
            LoaderPhase::Exhausted
        } else {
            LoaderPhase::Idle
        }
    }

    /// Active filters.
    #[must_use]
    pub const fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Active sort.
    #[must_use]
    pub const fn sort(&self) -> &SortSpec {
        &self.sort
    }

    /// Next page to fetch (1-based).
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// True while a fetch for the current generation is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// True once a short page has been received.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Query generation; bumped by every reset.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Items loaded since the last reset, in request order.
    #[must_use]
    pub fn cached_items(&self) -> &[ContentItem] {
        &self.cache
    }

    /// Looks up a loaded item by identifier.
    #[must_use]
    pub fn find_cached(&self, id: &ContentId) -> Option<&ContentItem> {
        self.cache.iter().find(|item| &item.id == id)
    }

    /// Rewinds the cursor and starts a new generation.
    ///
    /// `is_loading` is cleared so a fetch for the new generation can start
    /// while a stale one is still in flight.
    pub(super) fn reset(&mut self) {
        self.current_page = 1;
        self.exhausted = false;
        self.is_loading = false;
        self.cache.clear();
        self.generation = self.generation.wrapping_add(1);
    }
}

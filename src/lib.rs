//! Blogline library crate for browsing a content-management-backed blog.
//!
//! The library talks to the blog's REST content API, pages through filtered
//! content lists with [`ListLoader`], and surfaces friendly errors that can be
//! displayed in the CLI. Rendering is delegated to a [`ListRenderer`] so the
//! same loader drives terminal output, tests, or any other view.

pub mod config;
pub mod content;
pub mod loader;
pub mod telemetry;

pub use config::{BloglineConfig, OperationMode};
pub use content::{
    ALL_FILTER_VALUE, ArticleGateway, ContentApi, ContentError, ContentId, ContentItem,
    ContentStats, Filters, GatewayOptions, HttpContentGateway, ListQuery, MAX_PAGE_LIMIT,
    SortOrder, SortSpec, categories_from_items, content_types_from_items, discover_categories,
    discover_content_types, humanise_slug,
};
pub use loader::{
    ListLoader, ListRenderer, LoadOutcome, LoaderOptions, LoaderPhase, LoaderState, RenderMode,
};

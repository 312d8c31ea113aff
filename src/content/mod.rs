//! Content API models, queries and gateways.
//!
//! This module describes the REST content resource: the items it lists,
//! the query parameters the list endpoint accepts, the errors a request can
//! raise, and the trait-based gateways used to reach it. Errors are mapped
//! into a small taxonomy so that callers can show precise messages without
//! depending on reqwest internals.

pub mod categories;
pub mod error;
pub mod gateway;
pub mod models;
pub mod query;

pub use categories::{
    categories_from_items, content_types_from_items, discover_categories, discover_content_types,
};
pub use error::ContentError;
pub use gateway::{ArticleGateway, ContentApi, GatewayOptions, HttpContentGateway};
pub use models::{ContentId, ContentItem, ContentStats, humanise_slug};
pub use query::{ALL_FILTER_VALUE, Filters, ListQuery, MAX_PAGE_LIMIT, SortOrder, SortSpec};

#[cfg(test)]
pub use gateway::{MockArticleGateway, MockContentApi};

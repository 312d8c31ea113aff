//! Gateways for talking to the content API.
//!
//! The list loader only depends on [`ContentApi`]; single-article views use
//! [`ArticleGateway`]. Both traits are implemented over HTTP by
//! [`HttpContentGateway`] and can be mocked in tests.

mod error_mapping;
mod rest;

pub use rest::{GatewayOptions, HttpContentGateway};

use async_trait::async_trait;

use crate::content::error::ContentError;
use crate::content::models::{ContentId, ContentItem, ContentStats};
use crate::content::query::ListQuery;

/// Gateway exposing the paginated list endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// Fetch one page of items for `query`.
    async fn list(&self, query: &ListQuery) -> Result<Vec<ContentItem>, ContentError>;
}

/// Gateway for single-article, related-article and stats lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleGateway: Send + Sync {
    /// Fetch one article by identifier.
    async fn article(&self, id: &ContentId) -> Result<ContentItem, ContentError>;

    /// Fetch articles related to `id`.
    async fn related(&self, id: &ContentId) -> Result<Vec<ContentItem>, ContentError>;

    /// Fetch aggregate counters.
    async fn stats(&self) -> Result<ContentStats, ContentError>;
}

#[async_trait]
impl<T> ContentApi for &T
where
    T: ContentApi + ?Sized,
{
    async fn list(&self, query: &ListQuery) -> Result<Vec<ContentItem>, ContentError> {
        (**self).list(query).await
    }
}

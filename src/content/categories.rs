//! Category and content type discovery for navigation menus and filter
//! lists.
//!
//! The admin API exposes a stats endpoint keyed by category. The public API
//! has no such endpoint, so discovery falls back to scanning one large page
//! of content and collecting the distinct values it carries. Content types
//! are only ever discovered by scanning.

use std::collections::BTreeSet;

use super::error::ContentError;
use super::gateway::{ArticleGateway, ContentApi};
use super::models::ContentItem;
use super::query::{Filters, ListQuery, MAX_PAGE_LIMIT, SortSpec};

/// Returns sorted category slugs, preferring the stats endpoint.
///
/// # Errors
///
/// Returns the list endpoint's error when the stats lookup fails and the
/// fallback scan fails too.
pub async fn discover_categories<S, L>(stats: &S, lister: &L) -> Result<Vec<String>, ContentError>
where
    S: ArticleGateway + ?Sized,
    L: ContentApi + ?Sized,
{
    match stats.stats().await {
        Ok(counters) => Ok(counters.categories()),
        Err(error) => {
            tracing::debug!(%error, "stats unavailable, scanning content for categories");
            let items = scan_first_page(lister).await?;
            Ok(categories_from_items(&items))
        }
    }
}

/// Returns the sorted content type slugs found on one large list page.
///
/// # Errors
///
/// Returns the list endpoint's error when the scan fails.
pub async fn discover_content_types<L>(lister: &L) -> Result<Vec<String>, ContentError>
where
    L: ContentApi + ?Sized,
{
    let items = scan_first_page(lister).await?;
    Ok(content_types_from_items(&items))
}

async fn scan_first_page<L>(lister: &L) -> Result<Vec<ContentItem>, ContentError>
where
    L: ContentApi + ?Sized,
{
    let query = ListQuery::for_page(1, MAX_PAGE_LIMIT, &SortSpec::default(), &Filters::new())?;
    lister.list(&query).await
}

/// Collects the distinct category slugs of `items` in sorted order.
#[must_use]
pub fn categories_from_items(items: &[ContentItem]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| item.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Collects the distinct content type slugs of `items` in sorted order.
#[must_use]
pub fn content_types_from_items(items: &[ContentItem]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| item.content_type.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use rstest::rstest;
    use serde_json::json;

    use super::{
        categories_from_items, content_types_from_items, discover_categories,
        discover_content_types,
    };
    use crate::content::error::ContentError;
    use crate::content::gateway::{MockArticleGateway, MockContentApi};
    use crate::content::models::{ContentId, ContentItem, ContentStats};

    fn item(id: &str, category: Option<&str>) -> ContentItem {
        let mut item = ContentItem::with_id(ContentId::new(id).expect("id should be valid"));
        item.category = category.map(ToOwned::to_owned);
        item
    }

    #[rstest]
    fn collects_distinct_sorted_categories() {
        let items = vec![
            item("1", Some("web_dev")),
            item("2", Some("ai")),
            item("3", None),
            item("4", Some("web_dev")),
        ];

        assert_eq!(categories_from_items(&items), vec!["ai", "web_dev"]);
    }

    fn typed(id: &str, content_type: Option<&str>) -> ContentItem {
        let mut item = ContentItem::with_id(ContentId::new(id).expect("id should be valid"));
        item.content_type = content_type.map(ToOwned::to_owned);
        item
    }

    #[rstest]
    fn collects_distinct_sorted_content_types() {
        let items = vec![
            typed("1", Some("course")),
            typed("2", Some("article")),
            typed("3", None),
            typed("4", Some("course")),
        ];

        assert_eq!(content_types_from_items(&items), vec!["article", "course"]);
    }

    #[tokio::test]
    async fn content_types_come_from_one_large_unfiltered_page() {
        let mut lister = MockContentApi::new();
        lister
            .expect_list()
            .withf(|query| query.skip() == 0 && query.limit() == 100 && query.filters().is_empty())
            .times(1)
            .returning(|_| Ok(vec![typed("1", Some("video")), typed("2", Some("article"))]));

        let content_types = discover_content_types(&lister)
            .await
            .expect("discovery should succeed");

        assert_eq!(content_types, vec!["article", "video"]);
    }

    #[tokio::test]
    async fn content_type_scan_failure_is_returned() {
        let mut lister = MockContentApi::new();
        lister.expect_list().returning(|_| {
            Err(ContentError::Network {
                message: "offline".to_owned(),
            })
        });

        let error = discover_content_types(&lister)
            .await
            .expect_err("scan failure should fail");

        assert!(matches!(error, ContentError::Network { .. }));
    }

    #[tokio::test]
    async fn prefers_stats_endpoint() {
        let mut stats = MockArticleGateway::new();
        stats.expect_stats().times(1).returning(|| {
            Ok(serde_json::from_value::<ContentStats>(
                json!({ "by_category": { "cloud": 2, "ai": 1 } }),
            )
            .expect("stats should deserialise"))
        });
        let mut lister = MockContentApi::new();
        lister.expect_list().never();

        let categories = discover_categories(&stats, &lister)
            .await
            .expect("discovery should succeed");

        assert_eq!(categories, vec!["ai", "cloud"]);
    }

    #[tokio::test]
    async fn falls_back_to_scanning_one_large_page() {
        let mut stats = MockArticleGateway::new();
        stats.expect_stats().times(1).returning(|| {
            Err(ContentError::HttpStatus {
                status: StatusCode::NOT_FOUND,
                body: String::new(),
            })
        });
        let mut lister = MockContentApi::new();
        lister
            .expect_list()
            .withf(|query| query.skip() == 0 && query.limit() == 100)
            .times(1)
            .returning(|_| Ok(vec![item("1", Some("ml")), item("2", Some("devops"))]));

        let categories = discover_categories(&stats, &lister)
            .await
            .expect("fallback should succeed");

        assert_eq!(categories, vec!["devops", "ml"]);
    }

    #[tokio::test]
    async fn surfaces_fallback_failure() {
        let mut stats = MockArticleGateway::new();
        stats.expect_stats().returning(|| {
            Err(ContentError::Network {
                message: "offline".to_owned(),
            })
        });
        let mut lister = MockContentApi::new();
        lister.expect_list().returning(|_| {
            Err(ContentError::Network {
                message: "offline".to_owned(),
            })
        });

        let error = discover_categories(&stats, &lister)
            .await
            .expect_err("both lookups failing should fail");

        assert!(matches!(error, ContentError::Network { .. }));
    }
}

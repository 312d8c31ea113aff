//! Paged content listing.

use std::io::{self, Write};

use blogline::{BloglineConfig, ContentApi, ContentError, ListLoader, LoadOutcome};

use super::output::{CardTemplate, TerminalRenderer, write_listing_footer};

/// Lists content pages to stdout.
///
/// # Errors
///
/// Returns [`ContentError::Configuration`] or [`ContentError::Template`]
/// for invalid settings and the gateway's error when a page fails to load.
pub async fn run<A: ContentApi>(config: &BloglineConfig, api: A) -> Result<(), ContentError> {
    let mut stdout = io::stdout().lock();
    run_with_writer(config, api, &mut stdout).await
}

/// Lists content pages to `writer`.
///
/// The configured filters are applied in one step, which loads the first
/// page. Further pages are loaded until `pages` pages have been shown, or
/// until the list is exhausted when `all_pages` is set.
pub async fn run_with_writer<A, W>(
    config: &BloglineConfig,
    api: A,
    writer: &mut W,
) -> Result<(), ContentError>
where
    A: ContentApi,
    W: Write,
{
    let options = config.loader_options()?;
    let filters = config.filters();
    let template = CardTemplate::from_source(config.card_template.as_deref())?;
    let renderer = TerminalRenderer::new(&mut *writer, template);
    let loader = ListLoader::new(api, &renderer, options)?;

    let mut outcome = loader.set_filters(filters.iter()).await;
    let mut pages_loaded = 0_u32;
    loop {
        match outcome {
            LoadOutcome::Loaded { .. } => pages_loaded += 1,
            LoadOutcome::Failed(error) => return Err(error),
            LoadOutcome::Empty | LoadOutcome::Skipped | LoadOutcome::Stale => break,
        }
        if let Some(failure) = renderer.take_failure() {
            return Err(failure);
        }
        if loader.is_exhausted() || (!config.all_pages && pages_loaded >= config.pages) {
            break;
        }
        outcome = loader.load_next().await;
    }

    tracing::debug!(
        pages = pages_loaded,
        items = loader.cached_len(),
        "listing finished"
    );
    let exhausted = loader.is_exhausted();
    drop(loader);
    if let Some(failure) = renderer.take_failure() {
        return Err(failure);
    }
    let shown = renderer.shown();
    let target = renderer.into_inner();
    write_listing_footer(target, shown, exhausted)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use blogline::{BloglineConfig, ContentApi, ContentError, ContentId, ContentItem, ListQuery};
    use http::StatusCode;

    use super::run_with_writer;

    #[derive(Clone, Default)]
    struct CapturingGateway {
        captured: Arc<Mutex<Vec<ListQuery>>>,
        responses: Arc<Mutex<Vec<Result<Vec<ContentItem>, ContentError>>>>,
    }

    impl CapturingGateway {
        fn with_responses(responses: Vec<Result<Vec<ContentItem>, ContentError>>) -> Self {
            let mut queued = responses;
            queued.reverse();
            Self {
                captured: Arc::new(Mutex::new(Vec::new())),
                responses: Arc::new(Mutex::new(queued)),
            }
        }

        fn skips(&self) -> Vec<u64> {
            self.captured
                .lock()
                .expect("captured mutex should be available")
                .iter()
                .map(ListQuery::skip)
                .collect()
        }

        fn captured(&self) -> Vec<ListQuery> {
            self.captured
                .lock()
                .expect("captured mutex should be available")
                .clone()
        }
    }

    #[async_trait]
    impl ContentApi for CapturingGateway {
        async fn list(&self, query: &ListQuery) -> Result<Vec<ContentItem>, ContentError> {
            self.captured
                .lock()
                .expect("captured mutex should be available")
                .push(query.clone());
            self.responses
                .lock()
                .expect("responses mutex should be available")
                .pop()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn items(prefix: &str, count: usize) -> Vec<ContentItem> {
        (0..count)
            .map(|index| {
                let mut item = ContentItem::with_id(
                    ContentId::new(format!("{prefix}{index}")).expect("id should be valid"),
                );
                item.title = Some(format!("Post {prefix}{index}"));
                item
            })
            .collect()
    }

    fn config_with_ids_template() -> BloglineConfig {
        BloglineConfig {
            page_limit: 2,
            card_template: Some("{{ id }}".to_owned()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn loads_configured_number_of_pages() {
        let gateway = CapturingGateway::with_responses(vec![Ok(items("a", 2)), Ok(items("b", 2))]);
        let config = BloglineConfig {
            pages: 2,
            ..config_with_ids_template()
        };
        let mut buffer = Vec::new();

        run_with_writer(&config, &gateway, &mut buffer)
            .await
            .expect("listing should succeed");

        assert_eq!(gateway.skips(), vec![0, 2]);
        assert_eq!(
            String::from_utf8(buffer).expect("UTF-8"),
            "a0\n\na1\n\nb0\n\nb1\n\n4 items. More content available (use --pages or --all-pages).\n"
        );
    }

    #[tokio::test]
    async fn all_pages_stops_at_short_page() {
        let gateway = CapturingGateway::with_responses(vec![
            Ok(items("a", 2)),
            Ok(items("b", 2)),
            Ok(items("c", 1)),
        ]);
        let config = BloglineConfig {
            all_pages: true,
            ..config_with_ids_template()
        };
        let mut buffer = Vec::new();

        run_with_writer(&config, &gateway, &mut buffer)
            .await
            .expect("listing should succeed");

        assert_eq!(gateway.skips(), vec![0, 2, 4]);
        let output = String::from_utf8(buffer).expect("UTF-8");
        assert!(output.ends_with("5 items, end of list.\n"), "{output}");
    }

    #[tokio::test]
    async fn configured_filters_reach_the_query() {
        let gateway = CapturingGateway::with_responses(vec![Ok(items("a", 1))]);
        let config = BloglineConfig {
            category: Some("machine_learning".to_owned()),
            content_type: Some("all".to_owned()),
            ..config_with_ids_template()
        };
        let mut buffer = Vec::new();

        run_with_writer(&config, &gateway, &mut buffer)
            .await
            .expect("listing should succeed");

        let captured = gateway.captured();
        let [query] = captured.as_slice() else {
            panic!("expected a single list request, got {}", captured.len());
        };
        assert_eq!(query.filters().get("category"), Some("machine_learning"));
        assert_eq!(query.filters().get("content_type"), None);
    }

    #[tokio::test]
    async fn empty_listing_prints_empty_state() {
        let gateway = CapturingGateway::with_responses(vec![Ok(Vec::new())]);
        let mut buffer = Vec::new();

        run_with_writer(&config_with_ids_template(), &gateway, &mut buffer)
            .await
            .expect("empty listing should succeed");

        assert_eq!(
            String::from_utf8(buffer).expect("UTF-8"),
            "No content found with the current filters.\n"
        );
    }

    #[tokio::test]
    async fn failed_page_is_returned() {
        let gateway = CapturingGateway::with_responses(vec![Err(ContentError::HttpStatus {
            status: StatusCode::BAD_GATEWAY,
            body: "upstream down".to_owned(),
        })]);
        let mut buffer = Vec::new();

        let error = run_with_writer(&config_with_ids_template(), &gateway, &mut buffer)
            .await
            .expect_err("listing should fail");

        assert!(matches!(
            error,
            ContentError::HttpStatus {
                status: StatusCode::BAD_GATEWAY,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn invalid_page_limit_is_rejected_before_fetching() {
        let gateway = CapturingGateway::default();
        let config = BloglineConfig {
            page_limit: 0,
            ..Default::default()
        };
        let mut buffer = Vec::new();

        let error = run_with_writer(&config, &gateway, &mut buffer)
            .await
            .expect_err("limit 0 should be rejected");

        assert!(matches!(error, ContentError::Configuration { .. }));
        assert!(gateway.skips().is_empty());
    }
}

//! End-to-end listing against a mock content API.

use std::sync::Mutex;

use blogline::{
    ContentItem, GatewayOptions, HttpContentGateway, ListLoader, ListRenderer, LoadOutcome,
    LoaderOptions, RenderMode,
};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CONTENTS_PATH: &str = "/api/v1/public/contents/";

#[derive(Default)]
struct PageLog {
    pages: Mutex<Vec<(RenderMode, Vec<String>)>>,
    errors: Mutex<Vec<String>>,
}

impl PageLog {
    fn pages(&self) -> Vec<(RenderMode, Vec<String>)> {
        self.pages
            .lock()
            .expect("page log should be available")
            .clone()
    }

    fn errors(&self) -> Vec<String> {
        self.errors
            .lock()
            .expect("error log should be available")
            .clone()
    }
}

impl ListRenderer for PageLog {
    fn clear(&self) {
        self.pages
            .lock()
            .expect("page log should be available")
            .clear();
    }

    fn render(&self, page: &[ContentItem], mode: RenderMode) {
        let ids = page.iter().map(|item| item.id.to_string()).collect();
        self.pages
            .lock()
            .expect("page log should be available")
            .push((mode, ids));
    }

    fn show_empty(&self, _message: &str) {}

    fn show_error(&self, message: &str) {
        self.errors
            .lock()
            .expect("error log should be available")
            .push(message.to_owned());
    }
}

fn items(prefix: &str, count: usize) -> Value {
    Value::Array(
        (0..count)
            .map(|index| {
                json!({
                    "_id": format!("{prefix}{index}"),
                    "title": format!("Post {prefix}{index}"),
                    "category": "web_development",
                    "word_count": 250
                })
            })
            .collect(),
    )
}

async fn mount_page(server: &MockServer, skip: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(CONTENTS_PATH))
        .and(query_param("skip", skip))
        .and(query_param("limit", "12"))
        .and(query_param("category", "web_development"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

fn gateway_for(server: &MockServer) -> HttpContentGateway {
    HttpContentGateway::for_base_url(
        &format!("{}/api/v1/public", server.uri()),
        &GatewayOptions::default(),
    )
    .expect("gateway should build")
}

#[tokio::test]
async fn pages_through_filtered_listing_until_short_page() {
    let server = MockServer::start().await;
    mount_page(&server, "0", items("a", 12)).await;
    mount_page(&server, "12", items("b", 12)).await;
    mount_page(&server, "24", items("c", 5)).await;

    let gateway = gateway_for(&server);
    let log = PageLog::default();
    let loader = ListLoader::new(&gateway, &log, LoaderOptions::default())
        .expect("default options should be valid");

    let first = loader.set_filter("category", "web_development").await;
    let second = loader.load_next().await;
    let third = loader.load_next().await;
    let fourth = loader.load_next().await;

    assert!(matches!(first, LoadOutcome::Loaded { items: 12, .. }));
    assert!(matches!(second, LoadOutcome::Loaded { items: 12, .. }));
    assert_eq!(
        third,
        LoadOutcome::Loaded {
            items: 5,
            exhausted: true
        }
    );
    assert_eq!(fourth, LoadOutcome::Skipped);

    let modes: Vec<RenderMode> = log.pages().into_iter().map(|(mode, _)| mode).collect();
    assert_eq!(
        modes,
        vec![RenderMode::Replace, RenderMode::Append, RenderMode::Append]
    );
    assert_eq!(loader.cached_items().len(), 29);
    assert!(
        loader
            .cached_items()
            .iter()
            .all(|item| item.reading_time_minutes() == 2)
    );
}

#[tokio::test]
async fn server_error_is_shown_and_page_can_be_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CONTENTS_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(CONTENTS_PATH))
        .and(query_param("skip", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(items("a", 3)))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let log = PageLog::default();
    let loader = ListLoader::new(&gateway, &log, LoaderOptions::default())
        .expect("default options should be valid");

    let failed = loader.load_next().await;
    let retried = loader.load_next().await;

    assert!(matches!(failed, LoadOutcome::Failed(_)));
    assert_eq!(
        log.errors(),
        vec!["Could not load content: content API returned 503 Service Unavailable: maintenance"]
    );
    assert_eq!(
        retried,
        LoadOutcome::Loaded {
            items: 3,
            exhausted: true
        }
    );
}

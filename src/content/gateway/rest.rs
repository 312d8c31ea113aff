//! Reqwest-backed implementation of the content gateways.

use std::time::Duration;

use async_trait::async_trait;
use http::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use super::error_mapping::{
    ensure_json_content_type, map_article_error, map_status_error, map_transport_error,
};
use super::{ArticleGateway, ContentApi};
use crate::content::error::ContentError;
use crate::content::models::{ContentId, ContentItem, ContentStats};
use crate::content::query::ListQuery;

/// Header that suppresses the ngrok interstitial page on tunnelled APIs.
const NGROK_SKIP_WARNING: &str = "ngrok-skip-browser-warning";

/// Options applied when building the HTTP client.
#[derive(Debug, Clone, Default)]
pub struct GatewayOptions {
    /// Sends `ngrok-skip-browser-warning: true` with every request.
    pub ngrok_bypass: bool,
    /// Overall request timeout; reqwest's default applies when `None`.
    pub timeout: Option<Duration>,
}

/// Content gateway talking to the REST API under a base URL such as
/// `http://localhost:8000/api/v1/public`.
#[derive(Debug, Clone)]
pub struct HttpContentGateway {
    client: Client,
    base: Url,
}

impl HttpContentGateway {
    /// Creates a gateway from an existing client and a parsed base URL.
    #[must_use]
    pub fn new(client: Client, base: Url) -> Self {
        Self {
            client,
            base: with_trailing_slash(base),
        }
    }

    /// Parses `base_url` and builds a client configured by `options`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidUrl`] when the base URL cannot be parsed
    /// or cannot carry path segments, and [`ContentError::Configuration`] when
    /// the HTTP client cannot be constructed.
    pub fn for_base_url(base_url: &str, options: &GatewayOptions) -> Result<Self, ContentError> {
        let base = Url::parse(base_url.trim())
            .map_err(|error| ContentError::InvalidUrl(format!("{base_url}: {error}")))?;
        if base.cannot_be_a_base() {
            return Err(ContentError::InvalidUrl(format!(
                "{base_url}: URL cannot be used as an API base"
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if options.ngrok_bypass {
            headers.insert(
                HeaderName::from_static(NGROK_SKIP_WARNING),
                HeaderValue::from_static("true"),
            );
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|error| ContentError::Configuration {
                message: format!("build HTTP client failed: {error}"),
            })?;

        Ok(Self::new(client, base))
    }

    /// Returns the normalised base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ContentError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ContentError::InvalidUrl(format!("{}: not a base URL", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T>(
        &self,
        operation: &str,
        url: Url,
        query: &[(String, String)],
    ) -> Result<T, ContentError>
    where
        T: DeserializeOwned,
    {
        tracing::debug!(%url, operation, "requesting content API");
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|error| map_transport_error(operation, &error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status_error(status, &body));
        }

        ensure_json_content_type(response.headers())?;

        let bytes = response
            .bytes()
            .await
            .map_err(|error| map_transport_error(operation, &error))?;
        serde_json::from_slice(&bytes).map_err(|error| ContentError::Decode {
            message: format!("{operation}: {error}"),
        })
    }
}

#[async_trait]
impl ContentApi for HttpContentGateway {
    async fn list(&self, query: &ListQuery) -> Result<Vec<ContentItem>, ContentError> {
        let url = self.endpoint(&["contents", ""])?;
        self.get_json("list contents", url, &query.query_pairs())
            .await
    }
}

#[async_trait]
impl ArticleGateway for HttpContentGateway {
    async fn article(&self, id: &ContentId) -> Result<ContentItem, ContentError> {
        let url = self.endpoint(&["contents", id.as_str()])?;
        self.get_json("fetch article", url, &[])
            .await
            .map_err(|error| map_article_error(id, error))
    }

    async fn related(&self, id: &ContentId) -> Result<Vec<ContentItem>, ContentError> {
        let url = self.endpoint(&["contents", id.as_str(), "related"])?;
        self.get_json("fetch related articles", url, &[]).await
    }

    async fn stats(&self) -> Result<ContentStats, ContentError> {
        let url = self.endpoint(&["contents", "actions", "stats"])?;
        self.get_json("fetch content stats", url, &[]).await
    }
}

fn with_trailing_slash(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

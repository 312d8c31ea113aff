//! Application configuration loaded from CLI, environment, and files.
//!
//! Values are merged with ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults**: Built-in application defaults
//! 2. **Configuration file**: `.blogline.toml` in the current directory,
//!    home directory, or XDG config directory
//! 3. **Environment variables**: `BLOGLINE_API_BASE`, `BLOGLINE_CATEGORY`,
//!    and so on
//! 4. **Command-line arguments**: `--api-base`/`-a`, `--category`/`-c`, ...
//!
//! # Configuration File
//!
//! ```toml
//! api_base = "https://blog.example.com/api/v1/public"
//! page_limit = 12
//! sort_by = "created_at"
//! sort_order = "desc"
//! category = "web_development"
//! pages = 2
//! ```

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::content::query::validate_limit;
use crate::content::{ContentError, ContentId, Filters, GatewayOptions, SortOrder, SortSpec};
use crate::loader::{DEFAULT_PAGE_LIMIT, LoaderOptions};

/// API base used when none is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api/v1/public";

/// Operation mode determined by the configured fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Page through the content list.
    Listing,
    /// Show one article and its related articles.
    Article,
    /// List the known categories.
    Categories,
    /// List the content types found in the content.
    ContentTypes,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `BLOGLINE_API_BASE` or `--api-base`: Content API base URL
/// - `BLOGLINE_PAGE_LIMIT` or `--page-limit`: Items per page
/// - `BLOGLINE_CATEGORY` or `--category`: Category filter
/// - `BLOGLINE_CONTENT_TYPE` or `--content-type`: Content type filter
/// - `BLOGLINE_STATUS` or `--status`: Status filter (sent as `statuses`)
/// - `BLOGLINE_ARTICLE` or `--article`: Article identifier to show
///
/// Boolean flags are read from the CLI and configuration files only.
///
/// # Example
///
/// ```no_run
/// use blogline::BloglineConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = BloglineConfig::load().expect("failed to load configuration");
/// let sort = config.sort_spec().expect("sort should be valid");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "BLOGLINE",
    discovery(
        dotfile_name = ".blogline.toml",
        config_file_name = "blogline.toml",
        app_name = "blogline"
    )
)]
pub struct BloglineConfig {
    /// Base URL of the content API, e.g.
    /// `http://localhost:8000/api/v1/public`.
    #[ortho_config(cli_short = 'a')]
    pub api_base: Option<String>,

    /// Items requested per page, between 1 and 100.
    ///
    /// Defaults to 12.
    #[ortho_config(cli_short = 'l')]
    pub page_limit: u32,

    /// Field to sort by. Defaults to `created_at`.
    #[ortho_config(cli_short = 's')]
    pub sort_by: Option<String>,

    /// Sort direction: `asc`, `desc`, `1` or `-1`. Defaults to descending.
    #[ortho_config(cli_short = 'o')]
    pub sort_order: Option<String>,

    /// Category filter; `all` disables it.
    #[ortho_config(cli_short = 'c')]
    pub category: Option<String>,

    /// Content type filter (`article`, `course`, ...); `all` disables it.
    #[ortho_config(cli_short = 't')]
    pub content_type: Option<String>,

    /// Status filter for admin listings, sent as `statuses`.
    #[ortho_config(cli_short = 'S')]
    pub status: Option<String>,

    /// Number of pages to load in listing mode.
    ///
    /// Defaults to 1.
    #[ortho_config(cli_short = 'p')]
    pub pages: u32,

    /// Keeps loading until the list is exhausted.
    #[ortho_config(cli_short = 'A')]
    pub all_pages: bool,

    /// Identifier of an article to show instead of the listing.
    #[ortho_config(cli_short = 'i')]
    pub article: Option<String>,

    /// Lists the known categories instead of content.
    #[ortho_config(cli_short = 'C')]
    pub categories: bool,

    /// Lists the content types in use instead of content.
    #[ortho_config(cli_short = 'Y')]
    pub content_types: bool,

    /// Minijinja template used to render each listing card.
    #[ortho_config(cli_short = 'T')]
    pub card_template: Option<String>,

    /// Sends `ngrok-skip-browser-warning` with every request.
    #[ortho_config(cli_short = 'N')]
    pub ngrok_bypass: bool,

    /// Overall HTTP request timeout, in seconds.
    #[ortho_config(cli_short = 'W')]
    pub timeout_seconds: Option<u64>,

    /// Log filter directive used when `BLOGLINE_LOG` is unset.
    #[ortho_config(cli_short = 'L')]
    pub log_filter: Option<String>,
}

const DEFAULT_PAGES: u32 = 1;

impl Default for BloglineConfig {
    fn default() -> Self {
        Self {
            api_base: None,
            page_limit: DEFAULT_PAGE_LIMIT,
            sort_by: None,
            sort_order: None,
            category: None,
            content_type: None,
            status: None,
            pages: DEFAULT_PAGES,
            all_pages: false,
            article: None,
            categories: false,
            content_types: false,
            card_template: None,
            ngrok_bypass: false,
            timeout_seconds: None,
            log_filter: None,
        }
    }
}

impl BloglineConfig {
    /// Returns the configured API base or [`DEFAULT_API_BASE`].
    #[must_use]
    pub fn resolve_api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }

    /// Determines the operation mode.
    ///
    /// An article identifier wins over `categories`, which wins over
    /// `content_types`; otherwise the content is listed.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.article.is_some() {
            OperationMode::Article
        } else if self.categories {
            OperationMode::Categories
        } else if self.content_types {
            OperationMode::ContentTypes
        } else {
            OperationMode::Listing
        }
    }

    /// Builds the sort from `sort_by` and `sort_order`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Configuration`] when the order is not
    /// recognised or the field is blank.
    pub fn sort_spec(&self) -> Result<SortSpec, ContentError> {
        let defaults = SortSpec::default();
        let order = match self.sort_order.as_deref() {
            Some(value) => value.parse::<SortOrder>().map_err(into_configuration)?,
            None => defaults.order(),
        };
        let field = self
            .sort_by
            .clone()
            .unwrap_or_else(|| defaults.field().to_owned());
        SortSpec::new(field, order).map_err(into_configuration)
    }

    /// Builds the initial filters from `category`, `content_type` and
    /// `status`.
    #[must_use]
    pub fn filters(&self) -> Filters {
        [
            ("category", self.category.as_deref()),
            ("content_type", self.content_type.as_deref()),
            ("statuses", self.status.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|present| (name, present)))
        .collect()
    }

    /// Returns the article identifier to show.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Configuration`] when no article is configured
    /// or the identifier is blank.
    pub fn require_article(&self) -> Result<ContentId, ContentError> {
        let value = self
            .article
            .as_deref()
            .ok_or_else(|| ContentError::Configuration {
                message: "article identifier is required (use --article or -i)".to_owned(),
            })?;
        ContentId::new(value).map_err(into_configuration)
    }

    /// Builds loader options from the page limit and sort.
    ///
    /// Filters are left empty; the listing applies [`Self::filters`] in a
    /// single step once the loader exists.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Configuration`] when the page limit or sort
    /// is invalid.
    pub fn loader_options(&self) -> Result<LoaderOptions, ContentError> {
        validate_limit(self.page_limit).map_err(into_configuration)?;
        Ok(LoaderOptions {
            limit: self.page_limit,
            sort: self.sort_spec()?,
            ..LoaderOptions::default()
        })
    }

    /// Options for the HTTP gateway.
    #[must_use]
    pub fn gateway_options(&self) -> GatewayOptions {
        GatewayOptions {
            ngrok_bypass: self.ngrok_bypass,
            timeout: self.timeout_seconds.map(Duration::from_secs),
        }
    }

    /// Checks field combinations that cannot be honoured.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Configuration`] when `pages` is zero, the
    /// page limit or sort is invalid, or more than one of `article`,
    /// `categories` and `content_types` is requested.
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.pages == 0 {
            return Err(ContentError::Configuration {
                message: "pages must be at least 1".to_owned(),
            });
        }
        let modes = [self.article.is_some(), self.categories, self.content_types];
        if modes.into_iter().filter(|requested| *requested).count() > 1 {
            return Err(ContentError::Configuration {
                message: "--article, --categories and --content-types cannot be combined"
                    .to_owned(),
            });
        }
        self.loader_options().map(|_| ())
    }
}

fn into_configuration(error: ContentError) -> ContentError {
    match error {
        ContentError::InvalidQuery { message } => ContentError::Configuration { message },
        other => other,
    }
}

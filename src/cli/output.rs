//! Terminal output for listings, articles and categories.
//!
//! Listing cards are rendered through a Jinja2-compatible `minijinja`
//! template so the layout can be replaced with `--card-template`.
//!
//! # Card Variables
//!
//! - `id`: item identifier
//! - `title`: title, or `(untitled)`
//! - `category`: category label with underscores replaced by spaces
//! - `content_type`: content type slug
//! - `status`: status label
//! - `author`: author name
//! - `date`: publication date, e.g. `March 5, 2024`
//! - `reading_time`: whole minutes at 200 words per minute
//! - `preview`: plain-text preview of the body
//! - `keywords`: list of keywords
//! - `image_url`, `course_url`: links, empty when absent

use std::cell::{Cell, RefCell};
use std::io::{self, Write};

use blogline::{ContentError, ContentItem, ListRenderer, RenderMode};
use minijinja::{AutoEscape, Environment};
use serde::Serialize;

/// Characters of body text shown on a listing card.
const PREVIEW_CHARS: usize = 120;

/// Layout used when no card template is configured.
pub const DEFAULT_CARD_TEMPLATE: &str = "\
{{ title }}
  {{ category }}{% if content_type %} | {{ content_type }}{% endif %}\
{% if status %} | {{ status }}{% endif %}{% if date %} | {{ date }}{% endif %} | {{ reading_time }} min read
{% if preview %}  {{ preview }}
{% endif %}  id: {{ id }}";

#[derive(Debug, Serialize)]
struct CardContext<'item> {
    id: &'item str,
    title: &'item str,
    category: String,
    content_type: &'item str,
    status: String,
    author: &'item str,
    date: String,
    reading_time: u64,
    preview: String,
    keywords: &'item [String],
    image_url: &'item str,
    course_url: &'item str,
}

impl<'item> From<&'item ContentItem> for CardContext<'item> {
    fn from(item: &'item ContentItem) -> Self {
        Self {
            id: item.id.as_str(),
            title: item.title.as_deref().unwrap_or("(untitled)"),
            category: item.category_label().unwrap_or_default(),
            content_type: item.content_type.as_deref().unwrap_or_default(),
            status: item.status_label().unwrap_or_default(),
            author: item.created_by.as_deref().unwrap_or_default(),
            date: item.published_on().unwrap_or_default(),
            reading_time: item.reading_time_minutes(),
            preview: item.preview_text(PREVIEW_CHARS).unwrap_or_default(),
            keywords: item.keywords.as_deref().unwrap_or_default(),
            image_url: item.image_url.as_deref().unwrap_or_default(),
            course_url: item.course_url.as_deref().unwrap_or_default(),
        }
    }
}

/// Name the card template is registered under.
const CARD_TEMPLATE_NAME: &str = "card";

/// Compiled card template.
pub struct CardTemplate {
    env: Environment<'static>,
}

impl CardTemplate {
    /// Compiles `source`, or the default layout when `source` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Template`] when the template has syntax
    /// errors.
    pub fn from_source(source: Option<&str>) -> Result<Self, ContentError> {
        let mut env = Environment::new();

        // Cards go to a terminal, not a browser.
        env.set_auto_escape_callback(|_| AutoEscape::None);

        let text = source.unwrap_or(DEFAULT_CARD_TEMPLATE).to_owned();
        env.add_template_owned(CARD_TEMPLATE_NAME, text)
            .map_err(|error| ContentError::Template {
                message: format!("invalid card template syntax: {error}"),
            })?;
        Ok(Self { env })
    }

    /// Renders one card without a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Template`] when rendering fails.
    pub fn render(&self, item: &ContentItem) -> Result<String, ContentError> {
        let template = self
            .env
            .get_template(CARD_TEMPLATE_NAME)
            .map_err(|error| ContentError::Template {
                message: format!("failed to retrieve card template: {error}"),
            })?;
        template
            .render(CardContext::from(item))
            .map_err(|error| ContentError::Template {
                message: format!("card rendering failed: {error}"),
            })
    }
}

/// [`ListRenderer`] writing cards to a terminal stream.
///
/// Write and template failures cannot be returned through the renderer
/// interface; the first one is kept for [`TerminalRenderer::take_failure`].
pub struct TerminalRenderer<W> {
    writer: RefCell<W>,
    template: CardTemplate,
    shown: Cell<usize>,
    failure: RefCell<Option<ContentError>>,
}

impl<W: Write> TerminalRenderer<W> {
    /// Creates a renderer writing to `writer`.
    pub const fn new(writer: W, template: CardTemplate) -> Self {
        Self {
            writer: RefCell::new(writer),
            template,
            shown: Cell::new(0),
            failure: RefCell::new(None),
        }
    }

    /// Cards written since the last clear.
    pub fn shown(&self) -> usize {
        self.shown.get()
    }

    /// Takes the first write or template failure, if any.
    pub fn take_failure(&self) -> Option<ContentError> {
        self.failure.borrow_mut().take()
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn record_failure(&self, error: ContentError) {
        let mut failure = self.failure.borrow_mut();
        if failure.is_none() {
            *failure = Some(error);
        }
    }

    fn write_block(&self, text: &str) {
        let mut writer = self.writer.borrow_mut();
        if let Err(error) = writeln!(writer, "{text}") {
            drop(writer);
            self.record_failure(io_error(&error));
        }
    }

    fn write_card(&self, item: &ContentItem) {
        match self.template.render(item) {
            Ok(card) => {
                if self.shown.get() > 0 {
                    self.write_block("");
                }
                self.write_block(&card);
                self.shown.set(self.shown.get() + 1);
            }
            Err(error) => self.record_failure(error),
        }
    }
}

impl<W: Write> ListRenderer for TerminalRenderer<W> {
    fn clear(&self) {
        self.shown.set(0);
    }

    fn render(&self, page: &[ContentItem], mode: RenderMode) {
        if mode == RenderMode::Replace {
            self.shown.set(0);
        }
        for item in page {
            self.write_card(item);
        }
    }

    fn show_empty(&self, message: &str) {
        self.write_block(message);
    }

    fn show_error(&self, _message: &str) {
        // Load failures end the run and are written to stderr by the caller.
    }
}

/// Writes the line shown after a listing.
///
/// # Errors
///
/// Returns [`ContentError::Io`] if writing fails.
pub fn write_listing_footer<W: Write>(
    writer: &mut W,
    shown: usize,
    exhausted: bool,
) -> Result<(), ContentError> {
    if shown == 0 {
        return Ok(());
    }
    let noun = if shown == 1 { "item" } else { "items" };
    writeln!(writer).map_err(|e| io_error(&e))?;
    if exhausted {
        writeln!(writer, "{shown} {noun}, end of list.").map_err(|e| io_error(&e))
    } else {
        writeln!(
            writer,
            "{shown} {noun}. More content available (use --pages or --all-pages)."
        )
        .map_err(|e| io_error(&e))
    }
}

/// Writes an article followed by its related articles.
///
/// # Errors
///
/// Returns [`ContentError::Io`] if writing fails.
pub fn write_article<W: Write>(
    writer: &mut W,
    article: &ContentItem,
    related: &[ContentItem],
) -> Result<(), ContentError> {
    if let Some(category) = article.category_label() {
        writeln!(writer, "{}", category.to_uppercase()).map_err(|e| io_error(&e))?;
    }
    let title = article.title.as_deref().unwrap_or("(untitled)");
    writeln!(writer, "{title}").map_err(|e| io_error(&e))?;

    let mut byline = Vec::new();
    if let Some(author) = article.created_by.as_deref() {
        byline.push(format!("By {author}"));
    }
    if let Some(date) = article.published_on() {
        byline.push(date);
    }
    byline.push(format!("{} min read", article.reading_time_minutes()));
    writeln!(writer, "{}", byline.join(" • ")).map_err(|e| io_error(&e))?;

    if let Some(body) = article.content.as_deref() {
        writeln!(writer).map_err(|e| io_error(&e))?;
        writeln!(writer, "{body}").map_err(|e| io_error(&e))?;
    }

    if !related.is_empty() {
        writeln!(writer).map_err(|e| io_error(&e))?;
        writeln!(writer, "Related articles:").map_err(|e| io_error(&e))?;
        for item in related {
            let related_title = item.title.as_deref().unwrap_or("(untitled)");
            writeln!(writer, "  - {related_title} ({})", item.id).map_err(|e| io_error(&e))?;
        }
    }
    Ok(())
}

/// Writes one category per line with its label.
///
/// # Errors
///
/// Returns [`ContentError::Io`] if writing fails.
pub fn write_categories<W: Write>(
    writer: &mut W,
    categories: &[String],
) -> Result<(), ContentError> {
    write_slugs(writer, categories, "No categories found.")
}

/// Writes one content type per line with its label.
///
/// # Errors
///
/// Returns [`ContentError::Io`] if writing fails.
pub fn write_content_types<W: Write>(
    writer: &mut W,
    content_types: &[String],
) -> Result<(), ContentError> {
    write_slugs(writer, content_types, "No content types found.")
}

fn write_slugs<W: Write>(
    writer: &mut W,
    slugs: &[String],
    empty_message: &str,
) -> Result<(), ContentError> {
    if slugs.is_empty() {
        return writeln!(writer, "{empty_message}").map_err(|e| io_error(&e));
    }
    for slug in slugs {
        writeln!(writer, "{slug}\t{}", blogline::humanise_slug(slug)).map_err(|e| io_error(&e))?;
    }
    Ok(())
}

fn io_error(error: &io::Error) -> ContentError {
    ContentError::Io {
        message: error.to_string(),
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

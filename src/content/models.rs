//! Data models representing content items returned by the content API.
//!
//! Items are deserialised leniently: only the identifier is required, every
//! presentation field is optional and unknown fields are kept in `extra` so
//! that list handling never depends on the exact item shape.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::ContentError;

/// Words read per minute when estimating reading time.
pub const WORDS_PER_MINUTE: u64 = 200;

/// Identifier of a content item (`_id` on the wire).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    /// Creates an identifier, rejecting blank values.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidQuery`] when the value is empty or only
    /// whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, ContentError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ContentError::InvalidQuery {
                message: "content identifier must not be blank".to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl AsRef<str> for ContentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A single content record as listed by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Item identifier.
    #[serde(rename = "_id")]
    pub id: ContentId,
    /// Title, absent for AI drafts that have not been titled yet.
    pub title: Option<String>,
    /// Category slug (e.g. `web_development`).
    pub category: Option<String>,
    /// Content type slug (e.g. `article`).
    pub content_type: Option<String>,
    /// Publication status slug (e.g. `draft`, `published`, `archived`).
    pub status: Option<String>,
    /// Author display name.
    pub created_by: Option<String>,
    /// Creation timestamp as sent by the API.
    pub created_at: Option<String>,
    /// Body markup.
    pub content: Option<String>,
    /// Word count computed by the API.
    pub word_count: Option<u64>,
    /// Hero image URL.
    pub image_url: Option<String>,
    /// Keywords attached to the item.
    pub keywords: Option<Vec<String>>,
    /// Linked course URL.
    pub course_url: Option<String>,
    /// Fields this crate does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContentItem {
    /// Creates an item carrying only an identifier.
    #[must_use]
    pub fn with_id(id: ContentId) -> Self {
        Self {
            id,
            title: None,
            category: None,
            content_type: None,
            status: None,
            created_by: None,
            created_at: None,
            content: None,
            word_count: None,
            image_url: None,
            keywords: None,
            course_url: None,
            extra: Map::new(),
        }
    }

    /// Estimated reading time in whole minutes, rounded up.
    ///
    /// Uses `word_count` when the API supplies it and otherwise counts
    /// whitespace-separated words in `content`.
    #[must_use]
    pub fn reading_time_minutes(&self) -> u64 {
        let words = self.word_count.unwrap_or_else(|| {
            self.content.as_deref().map_or(0, |body| {
                u64::try_from(body.split_whitespace().count()).unwrap_or(u64::MAX)
            })
        });
        words.div_ceil(WORDS_PER_MINUTE)
    }

    /// Human-readable category label.
    #[must_use]
    pub fn category_label(&self) -> Option<String> {
        self.category.as_deref().map(humanise_slug)
    }

    /// Human-readable status label.
    #[must_use]
    pub fn status_label(&self) -> Option<String> {
        self.status.as_deref().map(humanise_slug)
    }

    /// Publication date formatted as `Month D, YYYY`.
    ///
    /// Returns `None` when the timestamp is absent or unparseable.
    #[must_use]
    pub fn published_on(&self) -> Option<String> {
        let raw = self.created_at.as_deref()?;
        parse_timestamp(raw).map(|date| date.format("%B %-d, %Y").to_string())
    }

    /// Plain-text preview of the body, truncated to `max_chars` characters.
    #[must_use]
    pub fn preview_text(&self, max_chars: usize) -> Option<String> {
        let body = self.content.as_deref()?;
        let stripped = strip_markup(body);
        if stripped.is_empty() {
            return None;
        }
        if stripped.chars().count() <= max_chars {
            return Some(stripped);
        }
        let mut preview: String = stripped.chars().take(max_chars).collect();
        preview.push_str("...");
        Some(preview)
    }
}

/// Aggregate counters returned by the admin stats endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentStats {
    /// Per-category counters keyed by category slug.
    #[serde(default)]
    pub by_category: BTreeMap<String, Value>,
    /// Counters this crate does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContentStats {
    /// Category slugs in sorted order.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        self.by_category.keys().cloned().collect()
    }
}

/// Replaces underscores in an API slug with spaces.
#[must_use]
pub fn humanise_slug(slug: &str) -> String {
    slug.replace('_', " ")
}

fn parse_timestamp(raw: &str) -> Option<NaiveDate> {
    if let Ok(zoned) = DateTime::parse_from_rfc3339(raw) {
        return Some(zoned.date_naive());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Drops anything between `<` and `>` and collapses whitespace.
fn strip_markup(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());
    let mut in_tag = false;
    for character in markup.chars() {
        match character {
            '<' => {
                in_tag = true;
                text.push(' ');
            }
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(character),
            _ => {}
        }
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

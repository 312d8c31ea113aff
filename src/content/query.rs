//! List query construction for the content list endpoint.
//!
//! A [`ListQuery`] is always derived from a 1-based page number and a page
//! limit so that `skip = (page - 1) * limit` holds by construction.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ContentError;

/// Filter value meaning "do not filter on this field".
pub const ALL_FILTER_VALUE: &str = "all";

/// Field the API sorts by when none is configured.
pub const DEFAULT_SORT_FIELD: &str = "created_at";

/// Largest page the list endpoint is asked for.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Oldest or smallest first.
    Ascending,
    /// Newest or largest first.
    #[default]
    Descending,
}

impl SortOrder {
    /// Returns the `sort_order` query parameter value (`1` or `-1`).
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Ascending => "1",
            Self::Descending => "-1",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ContentError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "asc" | "ascending" => Ok(Self::Ascending),
            "-1" | "desc" | "descending" => Ok(Self::Descending),
            other => Err(ContentError::InvalidQuery {
                message: format!("unknown sort order `{other}` (expected asc or desc)"),
            }),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => formatter.write_str("ascending"),
            Self::Descending => formatter.write_str("descending"),
        }
    }
}

/// Field and direction a list is sorted by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    field: String,
    order: SortOrder,
}

impl SortSpec {
    /// Creates a sort specification.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidQuery`] when `field` is blank.
    pub fn new(field: impl Into<String>, order: SortOrder) -> Result<Self, ContentError> {
        let field_name = field.into();
        if field_name.trim().is_empty() {
            return Err(ContentError::InvalidQuery {
                message: "sort field must not be blank".to_owned(),
            });
        }
        Ok(Self {
            field: field_name,
            order,
        })
    }

    /// Returns the field name.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the sort direction.
    #[must_use]
    pub const fn order(&self) -> SortOrder {
        self.order
    }

    /// Returns a copy sorting the same field in `order`.
    #[must_use]
    pub fn with_order(&self, order: SortOrder) -> Self {
        Self {
            field: self.field.clone(),
            order,
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: DEFAULT_SORT_FIELD.to_owned(),
            order: SortOrder::Descending,
        }
    }
}

/// Named filters applied to a list query, kept in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters(BTreeMap<String, String>);

impl Filters {
    /// Creates an empty filter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets or clears a filter.
    ///
    /// A blank value or [`ALL_FILTER_VALUE`] removes the filter. Returns
    /// `true` when the set changed.
    pub fn set(&mut self, name: &str, value: &str) -> bool {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == ALL_FILTER_VALUE {
            return self.0.remove(name).is_some();
        }
        let previous = self.0.insert(name.to_owned(), trimmed.to_owned());
        previous.as_deref() != Some(trimmed)
    }

    /// Returns the active value for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Iterates over active filters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Returns true when no filter is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of active filters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K, V> FromIterator<(K, V)> for Filters
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut filters = Self::new();
        for (name, value) in iter {
            filters.set(name.as_ref(), value.as_ref());
        }
        filters
    }
}

/// One request against the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    skip: u64,
    limit: u32,
    sort: SortSpec,
    filters: Filters,
}

impl ListQuery {
    /// Builds the query for a 1-based `page` of `limit` items.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidQuery`] when `page` is zero or `limit`
    /// lies outside `1..=MAX_PAGE_LIMIT`.
    pub fn for_page(
        page: u32,
        limit: u32,
        sort: &SortSpec,
        filters: &Filters,
    ) -> Result<Self, ContentError> {
        if page == 0 {
            return Err(ContentError::InvalidQuery {
                message: "page must be at least 1".to_owned(),
            });
        }
        validate_limit(limit)?;

        let skip = u64::from(page - 1).saturating_mul(u64::from(limit));
        Ok(Self {
            skip,
            limit,
            sort: sort.clone(),
            filters: filters.clone(),
        })
    }

    /// Number of items skipped before this page.
    #[must_use]
    pub const fn skip(&self) -> u64 {
        self.skip
    }

    /// Maximum number of items requested.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Sort applied to the query.
    #[must_use]
    pub const fn sort(&self) -> &SortSpec {
        &self.sort
    }

    /// Filters applied to the query.
    #[must_use]
    pub const fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Query parameters in wire order: cursor, sort, then filters by name.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("skip".to_owned(), self.skip.to_string()),
            ("limit".to_owned(), self.limit.to_string()),
            ("sort_by".to_owned(), self.sort.field().to_owned()),
            (
                "sort_order".to_owned(),
                self.sort.order().as_param().to_owned(),
            ),
        ];
        pairs.extend(
            self.filters
                .iter()
                .map(|(name, value)| (name.to_owned(), value.to_owned())),
        );
        pairs
    }
}

/// Checks that a page limit lies within `1..=MAX_PAGE_LIMIT`.
///
/// # Errors
///
/// Returns [`ContentError::InvalidQuery`] describing the violated bound.
pub fn validate_limit(limit: u32) -> Result<(), ContentError> {
    if limit == 0 {
        return Err(ContentError::InvalidQuery {
            message: "limit must be at least 1".to_owned(),
        });
    }
    if limit > MAX_PAGE_LIMIT {
        return Err(ContentError::InvalidQuery {
            message: format!("limit must not exceed {MAX_PAGE_LIMIT}"),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;

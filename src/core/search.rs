//! Search parameters and paginated results

use crate::config::SearchConfig;
use crate::core::error::DomainResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Raw, unnormalized search input
///
/// Values arrive as loose JSON (query strings, request bodies) and are
/// normalized by [`SearchParams::new`].
///
/// # Example
/// ```rust,ignore
/// let params = SearchParams::new(
///     SearchInput::default()
///         .page(2)
///         .per_page(10)
///         .sort("name")
///         .sort_dir("desc")
///         .filter("coffee"),
/// );
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchInput {
    pub page: Option<Value>,
    pub per_page: Option<Value>,
    pub sort: Option<Value>,
    pub sort_dir: Option<Value>,
    pub filter: Option<Value>,
}

impl SearchInput {
    pub fn page(mut self, page: impl Into<Value>) -> Self {
        self.page = Some(page.into());
        self
    }

    pub fn per_page(mut self, per_page: impl Into<Value>) -> Self {
        self.per_page = Some(per_page.into());
        self
    }

    pub fn sort(mut self, sort: impl Into<Value>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn sort_dir(mut self, sort_dir: impl Into<Value>) -> Self {
        self.sort_dir = Some(sort_dir.into());
        self
    }

    pub fn filter(mut self, filter: impl Into<Value>) -> Self {
        self.filter = Some(filter.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized search parameters
///
/// - `page`: integer ≥ 1, else 1
/// - `per_page`: positive integer, else the configured default, capped at
///   the configured maximum
/// - `sort`: non-blank text, else `None`
/// - `sort_dir`: `asc`/`desc` (default `asc`), only set when `sort` is
/// - `filter`: non-blank text, else `None`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchParams {
    page: usize,
    per_page: usize,
    sort: Option<String>,
    sort_dir: Option<SortDirection>,
    filter: Option<String>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self::new(SearchInput::default())
    }
}

impl SearchParams {
    pub fn new(input: SearchInput) -> Self {
        Self::with_config(input, &SearchConfig::default())
    }

    pub fn with_config(input: SearchInput, config: &SearchConfig) -> Self {
        let page = input.page.as_ref().and_then(positive_integer).unwrap_or(1);

        let per_page = input
            .per_page
            .as_ref()
            .and_then(positive_integer)
            .unwrap_or(config.default_per_page)
            .min(config.max_per_page.max(1));

        let sort = input.sort.as_ref().and_then(non_blank);
        let sort_dir = sort.as_ref().map(|_| {
            match input
                .sort_dir
                .as_ref()
                .and_then(non_blank)
                .map(|dir| dir.to_lowercase())
                .as_deref()
            {
                Some("desc") => SortDirection::Desc,
                _ => SortDirection::Asc,
            }
        });

        let filter = input.filter.as_ref().and_then(non_blank);

        Self {
            page,
            per_page,
            sort,
            sort_dir,
            filter,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    pub fn sort_dir(&self) -> Option<SortDirection> {
        self.sort_dir
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Rows to skip for the current page, saturating for huge pages
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.per_page)
    }

    pub fn limit(&self) -> usize {
        self.per_page
    }
}

fn positive_integer(value: &Value) -> Option<usize> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    if number.is_finite() && number >= 1.0 && number.fract() == 0.0 {
        Some(number as usize)
    } else {
        None
    }
}

fn non_blank(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    if text.trim().is_empty() { None } else { Some(text) }
}

/// One page of search results plus the parameters that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult<E> {
    items: Vec<E>,
    total: usize,
    current_page: usize,
    per_page: usize,
    last_page: usize,
    sort: Option<String>,
    sort_dir: Option<SortDirection>,
    filter: Option<String>,
}

impl<E> SearchResult<E> {
    pub fn new(items: Vec<E>, total: usize, params: &SearchParams) -> Self {
        let per_page = params.per_page.max(1);
        let last_page = if total == 0 { 0 } else { total.div_ceil(per_page) };

        Self {
            items,
            total,
            current_page: params.page,
            per_page,
            last_page,
            sort: params.sort.clone(),
            sort_dir: params.sort_dir,
            filter: params.filter.clone(),
        }
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn into_items(self) -> Vec<E> {
        self.items
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn last_page(&self) -> usize {
        self.last_page
    }

    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    pub fn sort_dir(&self) -> Option<SortDirection> {
        self.sort_dir
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }
}

impl<E: Serialize> SearchResult<E> {
    /// JSON shape with items in their own serialized form
    pub fn to_json(&self) -> DomainResult<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

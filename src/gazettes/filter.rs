//! # Query Filter
//!
//! A caller's search intent: territory, date range, keywords and page.

use std::fmt;

use chrono::NaiveDate;

/// Internal index of the first page
pub const DEFAULT_PAGE: usize = 0;

/// Page size used when the caller does not provide one
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Distance between the caller-facing page number and the internal index.
///
/// Callers count pages from 1; the filter counts from 0.
pub const PAGE_NUMBER_OFFSET: usize = 1;

/// A keyword in its textual form.
///
/// Scalar values are converted the way the public API always rendered them:
/// numbers as their display text, booleans as `True` / `False`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword(String);

impl Keyword {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Keyword {
    fn from(value: &str) -> Self {
        Keyword(value.to_string())
    }
}

impl From<String> for Keyword {
    fn from(value: String) -> Self {
        Keyword(value)
    }
}

impl From<&String> for Keyword {
    fn from(value: &String) -> Self {
        Keyword(value.clone())
    }
}

impl From<bool> for Keyword {
    fn from(value: bool) -> Self {
        Keyword(if value { "True" } else { "False" }.to_string())
    }
}

macro_rules! keyword_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Keyword {
                fn from(value: $t) -> Self {
                    Keyword(value.to_string())
                }
            }
        )*
    };
}

keyword_from_number!(i32, i64, u32, u64, usize, f32, f64);

/// Normalize a caller-supplied keyword list.
///
/// An empty list means "no keyword filtering", the same as no list at all.
pub fn normalize_keywords<I, K>(keywords: Option<I>) -> Option<Vec<String>>
where
    I: IntoIterator<Item = K>,
    K: Into<Keyword>,
{
    let keywords: Vec<String> = keywords?
        .into_iter()
        .map(|k| k.into().into_string())
        .collect();

    if keywords.is_empty() {
        None
    } else {
        Some(keywords)
    }
}

/// Filter for one gazette query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFilter {
    /// Territory to match (None = all territories)
    pub territory_id: Option<String>,

    /// Inclusive lower bound on the publication date
    pub since: Option<NaiveDate>,

    /// Inclusive upper bound on the publication date
    pub until: Option<NaiveDate>,

    /// Keywords to match (None = no keyword filtering, never empty)
    pub keywords: Option<Vec<String>>,

    /// Zero-based page index
    pub page: usize,

    /// Number of records per page
    pub page_size: usize,
}

impl Default for QueryFilter {
    fn default() -> Self {
        Self {
            territory_id: None,
            since: None,
            until: None,
            keywords: None,
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QueryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_territory_id(mut self, territory_id: impl Into<String>) -> Self {
        self.territory_id = Some(territory_id.into());
        self
    }

    pub fn with_since(mut self, since: NaiveDate) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_until(mut self, until: NaiveDate) -> Self {
        self.until = Some(until);
        self
    }

    /// Set the keywords, normalizing them with [`normalize_keywords`]
    pub fn with_keywords<I, K>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Keyword>,
    {
        self.keywords = normalize_keywords(Some(keywords));
        self
    }

    /// Set the zero-based page index
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Set the page from a caller-facing, 1-based page number.
    ///
    /// The transport boundary rejects page numbers below 1 before calling
    /// this; a 0 here saturates to the first page.
    pub fn with_caller_page(mut self, page_number: usize) -> Self {
        self.page = page_number.saturating_sub(PAGE_NUMBER_OFFSET);
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }
}

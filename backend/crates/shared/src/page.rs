//! Pagination Primitives
//!
//! `PageRequest` describes a paged query (page number, size, sort field and
//! direction); `Page<T>` wraps one page of results with the metadata echoed
//! back to API clients.

use serde::Serialize;

/// Default page size for paged queries
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Upper bound for client-requested page sizes
pub const MAX_PAGE_SIZE: u32 = 100;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse a direction string, case-insensitive; anything that is not
    /// `asc` is treated as the given fallback.
    pub fn parse_or(value: &str, fallback: SortDirection) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => fallback,
        }
    }

    /// SQL keyword for this direction
    pub const fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Paged query parameters (0-based page number)
#[derive(Debug, Clone)]
pub struct PageRequest {
    page: u32,
    size: u32,
    sort: String,
    direction: SortDirection,
}

impl PageRequest {
    /// Create a page request; size is clamped to `1..=MAX_PAGE_SIZE`.
    pub fn new(
        page: u32,
        size: u32,
        sort: impl Into<String>,
        direction: SortDirection,
    ) -> Self {
        Self {
            page,
            size: size.clamp(1, MAX_PAGE_SIZE),
            sort: sort.into(),
            direction,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Requested sort field, as supplied by the client
    pub fn sort(&self) -> &str {
        &self.sort
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Row offset for SQL `OFFSET`
    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }

    /// Row limit for SQL `LIMIT`
    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

/// One page of results with metadata
///
/// Serialized shape (camelCase):
/// `{content, page, size, totalElements, totalPages, first, last, sort,
/// direction}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub first: bool,
    pub last: bool,
    pub sort: String,
    pub direction: SortDirection,
}

impl<T> Page<T> {
    /// Assemble a page from one page of rows and the total row count.
    pub fn new(content: Vec<T>, total_elements: u64, request: &PageRequest) -> Self {
        let size = request.size();
        let total_pages = if total_elements == 0 {
            0
        } else {
            total_elements.div_ceil(u64::from(size)) as u32
        };
        let page = request.page();

        Self {
            content,
            page,
            size,
            total_elements,
            total_pages,
            first: page == 0,
            last: total_pages == 0 || page + 1 >= total_pages,
            sort: request.sort().to_string(),
            direction: request.direction(),
        }
    }

    /// Map the page content, keeping the metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            first: self.first,
            last: self.last,
            sort: self.sort,
            direction: self.direction,
        }
    }
}

//! Pagination types for list queries.
//!
//! Paging is always pushed down to the store: the engine only turns a
//! `page`/`size` pair into `OFFSET`/`LIMIT` and wraps the store's
//! `(rows, total)` answer into a [`Paginator`].

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Page number used when a request does not carry one.
pub const DEFAULT_PAGE: u64 = 1;
/// Page size used when neither the request nor the configuration carries one.
pub const DEFAULT_PAGE_SIZE: u64 = 5;

/// Resolved paging parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub size: u64,
}

impl PageRequest {
    /// Create a new page request, clamping `page` to at least 1.
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page: page.max(1),
            size,
        }
    }

    /// Resolve raw request values, applying defaults and floor clamps.
    ///
    /// `page` falls back to 1 and is clamped to `>= 1`; `size` falls back
    /// to `default_size` and is clamped to `>= 0`.
    pub fn from_request(page: Option<i64>, size: Option<i64>, default_size: u64) -> Self {
        let page = page.map_or(DEFAULT_PAGE, |p| p.max(1) as u64);
        let size = size.map_or(default_size, |s| s.max(0) as u64);
        Self { page, size }
    }

    /// Calculate the SQL `OFFSET` value.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.size)
    }

    /// Return the SQL `LIMIT` value.
    pub fn limit(&self) -> u64 {
        self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// The uniform envelope returned by every list query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginator<T> {
    /// The rows on this page, in the requested order.
    pub response_list: Vec<T>,
    /// Current page number (1-based).
    pub page: u64,
    /// Requested page size.
    pub size: u64,
    /// Total number of matching rows, when the store reported it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    /// Total number of pages, when `total` is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u64>,
}

impl<T> Paginator<T> {
    /// Wrap a page of rows and the store's total count.
    ///
    /// Rows beyond `size` are dropped so the envelope never exceeds its page.
    pub fn new(mut rows: Vec<T>, page: &PageRequest, total: Option<u64>) -> Self {
        rows.truncate(page.size as usize);
        Self {
            response_list: rows,
            page: page.page,
            size: page.size,
            total,
            total_pages: total.map(|t| total_pages(t, page.size)),
        }
    }

    /// An empty page with a known total of zero.
    pub fn empty(page: &PageRequest) -> Self {
        Self::new(Vec::new(), page, Some(0))
    }

    /// Whether this page carries no rows.
    pub fn is_empty(&self) -> bool {
        self.response_list.is_empty()
    }

    /// Transform every row, keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginator<U> {
        Paginator {
            response_list: self.response_list.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total: self.total,
            total_pages: self.total_pages,
        }
    }

    /// Fallible variant of [`map`](Self::map).
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Paginator<U>, E> {
        let response_list = self
            .response_list
            .into_iter()
            .map(f)
            .collect::<Result<Vec<_>, E>>()?;
        Ok(Paginator {
            response_list,
            page: self.page,
            size: self.size,
            total: self.total,
            total_pages: self.total_pages,
        })
    }

    /// Return the single row of a `size = 1` lookup.
    pub fn into_single(self) -> AppResult<T> {
        self.response_list
            .into_iter()
            .next()
            .ok_or_else(|| AppError::not_found("No row matched the lookup"))
    }
}

/// `ceil(total / size)`; a zero page size yields zero pages.
fn total_pages(total: u64, size: u64) -> u64 {
    if size == 0 {
        0
    } else {
        total.div_ceil(size)
    }
}

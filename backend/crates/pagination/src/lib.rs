//! Offset pagination primitives shared by backend endpoints.
//!
//! The crate owns three things:
//!
//! - [`PageRequest`]: a validated one-based `page` and bounded `limit`.
//! - [`Paginated`]: the response envelope whose `total_pages` and `has_more`
//!   fields are always derived from `total` and the *requested* page.
//! - [`ResultWindow`]: the maximum depth an upstream source will page into.
//!
//! Derived metadata uses one formula everywhere:
//! `total_pages = ceil(total / limit)` and `has_more = page < total_pages`.
//!
//! # Examples
//!
//! ```
//! use pagination::{PageRequest, Paginated};
//!
//! let request = PageRequest::new(2, 1).expect("valid request");
//! let page = Paginated::new(vec!["b"], 2, request);
//! assert_eq!(page.total_pages(), 2);
//! assert!(!page.has_more());
//! ```

use serde::{Deserialize, Serialize};

/// Smallest accepted page number.
pub const MIN_PAGE: u32 = 1;
/// Largest accepted page size.
pub const MAX_PAGE_LIMIT: u32 = 100;
/// Page size used when callers do not supply one.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Validation failures raised by [`PageRequest::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// The page number was below [`MIN_PAGE`].
    #[error("page must be at least {min}, got {page}")]
    PageOutOfRange {
        /// Rejected page number.
        page: u32,
        /// Smallest accepted page number.
        min: u32,
    },
    /// The page size was zero or above [`MAX_PAGE_LIMIT`].
    #[error("limit must be between 1 and {max}, got {limit}")]
    LimitOutOfRange {
        /// Rejected page size.
        limit: u32,
        /// Largest accepted page size.
        max: u32,
    },
}

/// A validated offset pagination request.
///
/// ## Invariants
/// - `page >= 1`
/// - `1 <= limit <= 100`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPageRequest", into = "RawPageRequest")]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Validate and build a request. Out-of-range values are rejected, never
    /// clamped.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError`] when `page` or `limit` is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagination::{PageRequest, PaginationError};
    ///
    /// assert!(PageRequest::new(1, 10).is_ok());
    /// assert!(matches!(
    ///     PageRequest::new(0, 10),
    ///     Err(PaginationError::PageOutOfRange { .. })
    /// ));
    /// ```
    pub const fn new(page: u32, limit: u32) -> Result<Self, PaginationError> {
        if page < MIN_PAGE {
            return Err(PaginationError::PageOutOfRange {
                page,
                min: MIN_PAGE,
            });
        }
        if limit == 0 || limit > MAX_PAGE_LIMIT {
            return Err(PaginationError::LimitOutOfRange {
                limit,
                max: MAX_PAGE_LIMIT,
            });
        }
        Ok(Self { page, limit })
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Number of items per page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of records to skip before this page starts.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: MIN_PAGE,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawPageRequest {
    page: u32,
    limit: u32,
}

impl From<PageRequest> for RawPageRequest {
    fn from(value: PageRequest) -> Self {
        Self {
            page: value.page,
            limit: value.limit,
        }
    }
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = PaginationError;

    fn try_from(value: RawPageRequest) -> Result<Self, Self::Error> {
        Self::new(value.page, value.limit)
    }
}

/// Number of pages needed to show `total` records at `limit` per page.
///
/// A zero `limit` yields zero pages.
///
/// # Examples
///
/// ```
/// assert_eq!(pagination::total_pages(21, 10), 3);
/// assert_eq!(pagination::total_pages(0, 10), 0);
/// ```
#[must_use]
pub const fn total_pages(total: u64, limit: u32) -> u64 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit as u64)
}

/// A page of items plus metadata derived from the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    items: Vec<T>,
    total: u64,
    current_page: u32,
    total_pages: u64,
    has_more: bool,
}

impl<T> Paginated<T> {
    /// Build a page and derive `total_pages` and `has_more` from `total` and
    /// the requested page size.
    #[must_use]
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        let total_pages = total_pages(total, request.limit());
        Self {
            items,
            total,
            current_page: request.page(),
            total_pages,
            has_more: u64::from(request.page()) < total_pages,
        }
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Records matching the query across all pages.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// The requested page number.
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// `ceil(total / limit)`.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Whether a page after this one exists.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    /// Consume the page, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Convert each item while keeping the page metadata.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagination::{PageRequest, Paginated};
    ///
    /// let page = Paginated::new(vec![1, 2], 2, PageRequest::default());
    /// let labels = page.map(|n| n.to_string());
    /// assert_eq!(labels.items(), ["1", "2"]);
    /// ```
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            current_page: self.current_page,
            total_pages: self.total_pages,
            has_more: self.has_more,
        }
    }
}

/// Maximum number of records an upstream source will page through.
///
/// Sources such as openFDA refuse requests whose `skip` goes past a fixed
/// depth regardless of page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultWindow {
    max_records: u64,
}

impl ResultWindow {
    /// Build a window reaching `max_records` deep.
    #[must_use]
    pub const fn new(max_records: u64) -> Self {
        Self { max_records }
    }

    /// Deepest reachable record count.
    #[must_use]
    pub const fn max_records(&self) -> u64 {
        self.max_records
    }

    /// `floor(max_records / limit)`; zero when `limit` is zero.
    #[must_use]
    pub const fn max_pages(&self, limit: u32) -> u64 {
        match self.max_records.checked_div(limit as u64) {
            Some(pages) => pages,
            None => 0,
        }
    }

    /// Whether the requested page lies inside the window.
    #[must_use]
    pub const fn admits(&self, request: &PageRequest) -> bool {
        request.page() as u64 <= self.max_pages(request.limit())
    }

    /// Cap an upstream-reported total at the window depth.
    #[must_use]
    pub const fn cap(&self, total: u64) -> u64 {
        if total < self.max_records {
            total
        } else {
            self.max_records
        }
    }
}

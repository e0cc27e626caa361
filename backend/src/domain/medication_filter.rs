//! Validated medication search filter and the inbound request it comes from.
//!
//! A [`MedicationFilter`] is only ever built through validation: page and limit
//! bounds come from [`pagination::PageRequest`], and blank search terms are
//! treated as absent. The `ALL` route sentinel is handled by
//! [`MedicationListRequest::normalised`] before validation runs.

use pagination::{PageRequest, PaginationError};
use thiserror::Error;

/// Route value meaning "no route constraint".
pub const ALL_ROUTES_SENTINEL: &str = "ALL";

/// Raw list request as received from an inbound adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicationListRequest {
    /// One-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Optional active ingredient search term.
    pub active_ingredient: Option<String>,
    /// Optional route term, possibly the `ALL` sentinel.
    pub route: Option<String>,
    /// Optional brand or generic name term.
    pub name: Option<String>,
}

impl Default for MedicationListRequest {
    fn default() -> Self {
        let page = PageRequest::default();
        Self {
            page: page.page(),
            limit: page.limit(),
            active_ingredient: None,
            route: None,
            name: None,
        }
    }
}

impl MedicationListRequest {
    /// Drop the route when it is the `ALL` sentinel (trimmed, any case).
    ///
    /// # Examples
    /// ```
    /// use medication_api::domain::MedicationListRequest;
    ///
    /// let request = MedicationListRequest {
    ///     route: Some(" all ".into()),
    ///     ..MedicationListRequest::default()
    /// };
    /// assert_eq!(request.normalised().route, None);
    /// ```
    #[must_use]
    pub fn normalised(mut self) -> Self {
        self.route = self
            .route
            .filter(|route| !route.trim().eq_ignore_ascii_case(ALL_ROUTES_SENTINEL));
        self
    }
}

/// Validation failures raised while building a [`MedicationFilter`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MedicationFilterError {
    /// Page number below one.
    #[error("page must be at least {min}")]
    PageOutOfRange {
        /// Rejected page.
        page: u32,
        /// Smallest accepted page.
        min: u32,
    },
    /// Page size outside `1..=max`.
    #[error("limit must be between 1 and {max}")]
    LimitOutOfRange {
        /// Rejected limit.
        limit: u32,
        /// Largest accepted limit.
        max: u32,
    },
}

impl MedicationFilterError {
    /// Name of the offending request field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::PageOutOfRange { .. } => "page",
            Self::LimitOutOfRange { .. } => "limit",
        }
    }

    /// Stable machine-readable code for the failure.
    pub fn code(&self) -> &'static str {
        match self {
            Self::PageOutOfRange { .. } => "page_out_of_range",
            Self::LimitOutOfRange { .. } => "limit_out_of_range",
        }
    }

    /// The rejected value.
    pub fn value(&self) -> u32 {
        match self {
            Self::PageOutOfRange { page, .. } => *page,
            Self::LimitOutOfRange { limit, .. } => *limit,
        }
    }
}

impl From<PaginationError> for MedicationFilterError {
    fn from(value: PaginationError) -> Self {
        match value {
            PaginationError::PageOutOfRange { page, min } => Self::PageOutOfRange { page, min },
            PaginationError::LimitOutOfRange { limit, max } => Self::LimitOutOfRange { limit, max },
        }
    }
}

fn present(term: Option<String>) -> Option<String> {
    term.map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Validated filter for medication list queries.
///
/// ## Invariants
/// - `page >= 1` and `1 <= limit <= 100`.
/// - Search terms are trimmed and never blank.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MedicationFilter {
    page: PageRequest,
    active_ingredient: Option<String>,
    route: Option<String>,
    name: Option<String>,
}

impl MedicationFilter {
    /// A filter with no search terms.
    pub fn new(page: PageRequest) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    /// Set the active ingredient term; blank values clear it.
    #[must_use]
    pub fn with_active_ingredient(mut self, term: Option<String>) -> Self {
        self.active_ingredient = present(term);
        self
    }

    /// Set the route term; blank values clear it.
    #[must_use]
    pub fn with_route(mut self, term: Option<String>) -> Self {
        self.route = present(term);
        self
    }

    /// Set the name term; blank values clear it.
    #[must_use]
    pub fn with_name(mut self, term: Option<String>) -> Self {
        self.name = present(term);
        self
    }

    /// Requested page.
    pub fn page(&self) -> PageRequest {
        self.page
    }

    /// Active ingredient term.
    pub fn active_ingredient(&self) -> Option<&str> {
        self.active_ingredient.as_deref()
    }

    /// Route term.
    pub fn route(&self) -> Option<&str> {
        self.route.as_deref()
    }

    /// Brand or generic name term.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl TryFrom<MedicationListRequest> for MedicationFilter {
    type Error = MedicationFilterError;

    fn try_from(value: MedicationListRequest) -> Result<Self, Self::Error> {
        let MedicationListRequest {
            page,
            limit,
            active_ingredient,
            route,
            name,
        } = value;
        let page = PageRequest::new(page, limit)?;
        Ok(Self::new(page)
            .with_active_ingredient(active_ingredient)
            .with_route(route)
            .with_name(name))
    }
}

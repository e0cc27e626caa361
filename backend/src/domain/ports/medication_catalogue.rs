//! Port for the medication catalogue service and its error type.
//!
//! The catalogue service turns repository slices into [`Paginated`] pages and
//! offers named query variants. Use-cases depend on this trait so dispatch can
//! be tested against a mock.

use async_trait::async_trait;
use pagination::{PageRequest, Paginated};
use thiserror::Error;

use crate::domain::{Medication, MedicationFilter};

/// Failure category reported by the catalogue service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogueErrorKind {
    /// The requested medication does not exist.
    NotFound,
    /// The filter could not be turned into a query.
    InvalidFilter,
    /// The external catalogue could not be reached or answered badly.
    FetchError,
}

/// Catalogue service failure carrying a composed message with its cause.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CatalogueError {
    kind: CatalogueErrorKind,
    message: String,
}

impl CatalogueError {
    /// Build an error of the given kind.
    pub fn new(kind: CatalogueErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Build a [`CatalogueErrorKind::FetchError`].
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::new(CatalogueErrorKind::FetchError, message)
    }

    /// Failure category.
    pub fn kind(&self) -> CatalogueErrorKind {
        self.kind
    }

    /// Composed message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Catalogue operations used by the medication use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MedicationCatalogue: Send + Sync {
    /// Fetch one page for an arbitrary filter.
    async fn get_medications(
        &self,
        filter: &MedicationFilter,
    ) -> Result<Paginated<Medication>, CatalogueError>;

    /// Fetch one medication; `Ok(None)` when absent.
    async fn get_medication_by_id(&self, id: &str) -> Result<Option<Medication>, CatalogueError>;

    /// Medications containing `ingredient`.
    async fn search_by_active_ingredient(
        &self,
        ingredient: &str,
        page: PageRequest,
    ) -> Result<Paginated<Medication>, CatalogueError>;

    /// Medications administered via `route`.
    async fn filter_by_route(
        &self,
        route: &str,
        page: PageRequest,
    ) -> Result<Paginated<Medication>, CatalogueError>;

    /// Medications whose brand or generic name matches `name`.
    async fn filter_by_name(
        &self,
        name: &str,
        page: PageRequest,
    ) -> Result<Paginated<Medication>, CatalogueError>;

    /// Medications containing `ingredient` and administered via `route`.
    async fn search_by_ingredient_and_route(
        &self,
        ingredient: &str,
        route: &str,
        page: PageRequest,
    ) -> Result<Paginated<Medication>, CatalogueError>;
}

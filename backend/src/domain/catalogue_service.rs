//! Medication catalogue service: page metadata and named query variants.
//!
//! Every variant builds a [`MedicationFilter`] and funnels through
//! [`MedicationCatalogue::get_medications`], so `total_pages` and `has_more`
//! are always derived by [`Paginated::new`] from the requested page.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{PageRequest, Paginated};
use tracing::warn;

use crate::domain::ports::{CatalogueError, MedicationCatalogue, MedicationRepository};
use crate::domain::{Medication, MedicationFilter};

/// Catalogue service backed by a [`MedicationRepository`].
#[derive(Clone)]
pub struct MedicationCatalogueService<R> {
    repository: Arc<R>,
}

impl<R> MedicationCatalogueService<R> {
    /// Build the service over a catalogue repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> MedicationCatalogue for MedicationCatalogueService<R>
where
    R: MedicationRepository,
{
    async fn get_medications(
        &self,
        filter: &MedicationFilter,
    ) -> Result<Paginated<Medication>, CatalogueError> {
        let slice = self
            .repository
            .find_medications(filter)
            .await
            .map_err(|error| {
                warn!(%error, "medication list fetch failed");
                CatalogueError::fetch(format!("Failed to fetch medications: {error}"))
            })?;
        Ok(Paginated::new(slice.medications, slice.total, filter.page()))
    }

    async fn get_medication_by_id(&self, id: &str) -> Result<Option<Medication>, CatalogueError> {
        self.repository.find_by_id(id).await.map_err(|error| {
            warn!(%error, medication_id = id, "medication detail fetch failed");
            CatalogueError::fetch(format!("Failed to fetch medication with ID {id}: {error}"))
        })
    }

    async fn search_by_active_ingredient(
        &self,
        ingredient: &str,
        page: PageRequest,
    ) -> Result<Paginated<Medication>, CatalogueError> {
        let filter = MedicationFilter::new(page).with_active_ingredient(Some(ingredient.to_owned()));
        self.get_medications(&filter).await
    }

    async fn filter_by_route(
        &self,
        route: &str,
        page: PageRequest,
    ) -> Result<Paginated<Medication>, CatalogueError> {
        let filter = MedicationFilter::new(page).with_route(Some(route.to_owned()));
        self.get_medications(&filter).await
    }

    async fn filter_by_name(
        &self,
        name: &str,
        page: PageRequest,
    ) -> Result<Paginated<Medication>, CatalogueError> {
        let filter = MedicationFilter::new(page).with_name(Some(name.to_owned()));
        self.get_medications(&filter).await
    }

    async fn search_by_ingredient_and_route(
        &self,
        ingredient: &str,
        route: &str,
        page: PageRequest,
    ) -> Result<Paginated<Medication>, CatalogueError> {
        let filter = MedicationFilter::new(page)
            .with_active_ingredient(Some(ingredient.to_owned()))
            .with_route(Some(route.to_owned()));
        self.get_medications(&filter).await
    }
}

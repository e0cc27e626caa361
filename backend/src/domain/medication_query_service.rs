//! Medication use-cases: filter validation, dispatch and error mapping.
//!
//! The `ALL` route sentinel is removed here, before validation, and nowhere
//! else. Dispatch picks the most specific catalogue variant for the filter
//! combination; a bare filter keeps any `name` term.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::Paginated;
use serde_json::json;
use tracing::debug;

use crate::domain::ports::{
    CatalogueError, CatalogueErrorKind, MedicationCatalogue, MedicationDetailQuery,
    MedicationListQuery,
};
use crate::domain::{Error, Medication, MedicationFilter, MedicationFilterError, MedicationListRequest};

fn map_catalogue_error(error: CatalogueError) -> Error {
    match error.kind() {
        CatalogueErrorKind::FetchError => Error::service_unavailable(error.message()),
        CatalogueErrorKind::InvalidFilter => Error::invalid_request(error.message()),
        CatalogueErrorKind::NotFound => Error::not_found(error.message()),
    }
}

fn map_filter_error(error: &MedicationFilterError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field(),
        "code": error.code(),
        "value": error.value(),
    }))
}

/// Medication service implementing the list and detail driving ports.
#[derive(Clone)]
pub struct MedicationQueryService<C> {
    catalogue: Arc<C>,
}

impl<C> MedicationQueryService<C> {
    /// Create a query service over the catalogue service.
    pub fn new(catalogue: Arc<C>) -> Self {
        Self { catalogue }
    }
}

#[async_trait]
impl<C> MedicationListQuery for MedicationQueryService<C>
where
    C: MedicationCatalogue,
{
    async fn list(&self, request: MedicationListRequest) -> Result<Paginated<Medication>, Error> {
        let filter =
            MedicationFilter::try_from(request.normalised()).map_err(|err| map_filter_error(&err))?;
        let page = filter.page();
        debug!(
            page = page.page(),
            limit = page.limit(),
            active_ingredient = filter.active_ingredient(),
            route = filter.route(),
            name = filter.name(),
            "listing medications"
        );

        let result = match (filter.active_ingredient(), filter.route()) {
            (Some(ingredient), Some(route)) => {
                self.catalogue
                    .search_by_ingredient_and_route(ingredient, route, page)
                    .await
            }
            (Some(ingredient), None) => {
                self.catalogue
                    .search_by_active_ingredient(ingredient, page)
                    .await
            }
            (None, Some(route)) => self.catalogue.filter_by_route(route, page).await,
            (None, None) => self.catalogue.get_medications(&filter).await,
        };
        result.map_err(map_catalogue_error)
    }
}

#[async_trait]
impl<C> MedicationDetailQuery for MedicationQueryService<C>
where
    C: MedicationCatalogue,
{
    async fn detail(&self, id: &str) -> Result<Medication, Error> {
        let id = id.trim();
        if id.is_empty() {
            return Err(Error::invalid_request("medication id must not be empty"));
        }
        self.catalogue
            .get_medication_by_id(id)
            .await
            .map_err(map_catalogue_error)?
            .ok_or_else(|| Error::not_found("Medication not found"))
    }
}

#[cfg(test)]
#[path = "medication_query_service_tests.rs"]
mod tests;

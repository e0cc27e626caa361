//! Driven port for the external medication catalogue.
//!
//! The domain owns the request shape ([`MedicationFilter`]) and the result
//! contract ([`MedicationSlice`]); adapters own the wire format.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{Medication, MedicationFilter};

/// One page of catalogue results plus the catalogue's reported total.
///
/// `total` is already capped at the catalogue's reachable result window.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MedicationSlice {
    /// Medications on the requested page.
    pub medications: Vec<Medication>,
    /// Matching records, capped at the result window.
    pub total: u64,
}

define_port_error! {
    /// Errors surfaced by medication catalogue adapters.
    pub enum MedicationRepositoryError {
        /// The request failed before a response arrived.
        Transport { message: String } =>
            "catalogue transport failed: {message}",
        /// The request exceeded the configured timeout.
        Timeout { message: String } =>
            "catalogue request timed out: {message}",
        /// The catalogue answered with a non-success status.
        Upstream { status: u16, message: String } =>
            "catalogue returned status {status}: {message}",
        /// The response body did not match the expected schema.
        ResponseValidation { message: String } =>
            "catalogue response failed validation: {message}",
    }
}

/// Port for paginated medication lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MedicationRepository: Send + Sync {
    /// Fetch one page of medications matching `filter`.
    async fn find_medications(
        &self,
        filter: &MedicationFilter,
    ) -> Result<MedicationSlice, MedicationRepositoryError>;

    /// Fetch one medication by catalogue product identifier.
    ///
    /// Returns `Ok(None)` when the catalogue has no such product.
    async fn find_by_id(&self, id: &str) -> Result<Option<Medication>, MedicationRepositoryError>;
}

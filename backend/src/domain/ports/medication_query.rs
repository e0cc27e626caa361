//! Driving ports for the medication read endpoints.
//!
//! Inbound adapters call these use-cases with raw request values and receive
//! domain results or a transport-agnostic [`Error`].

use async_trait::async_trait;
use pagination::Paginated;

use crate::domain::{Error, Medication, MedicationListRequest};

/// Use-case port for paginated medication listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MedicationListQuery: Send + Sync {
    /// Validate, normalise and dispatch a list request.
    async fn list(&self, request: MedicationListRequest) -> Result<Paginated<Medication>, Error>;
}

/// Use-case port for single medication lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MedicationDetailQuery: Send + Sync {
    /// Fetch one medication or fail with `not_found`.
    async fn detail(&self, id: &str) -> Result<Medication, Error>;
}

//! openFDA outbound adapters.
//!
//! This module provides a thin HTTP implementation of the
//! `MedicationRepository` port over the openFDA NDC endpoint.

mod dto;
mod http_source;
mod query;

pub use http_source::{MAX_RESULT_WINDOW, OpenFdaMedicationRepository, OpenFdaSetupError};

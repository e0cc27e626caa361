//! Domain ports defining the edges of the hexagon.
//!
//! Driving ports (`MedicationListQuery`, `LoginService`, ...) are called by
//! inbound adapters. Driven ports (`MedicationRepository`, `UserRepository`,
//! `PasswordHasher`) are implemented by outbound adapters. Each driven port
//! exposes a typed error enum so adapters map failures into predictable
//! variants.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod medication_catalogue;
mod medication_query;
mod medication_repository;
mod password_hasher;
mod user_repository;

#[cfg(test)]
pub use login_service::{MockLoginService, MockRegistrationService, MockUserProfileQuery};
pub use login_service::{LoginService, RegistrationService, UserProfileQuery};
#[cfg(test)]
pub use medication_catalogue::MockMedicationCatalogue;
pub use medication_catalogue::{CatalogueError, CatalogueErrorKind, MedicationCatalogue};
#[cfg(test)]
pub use medication_query::{MockMedicationDetailQuery, MockMedicationListQuery};
pub use medication_query::{MedicationDetailQuery, MedicationListQuery};
#[cfg(test)]
pub use medication_repository::MockMedicationRepository;
pub use medication_repository::{MedicationRepository, MedicationRepositoryError, MedicationSlice};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};

//! Domain primitives, aggregates and use-case services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! outbound adapters. Keep types immutable and document invariants in each
//! type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Medication (alias to `medication::Medication`): catalogue product.
//! - MedicationFilter (alias to `medication_filter::MedicationFilter`):
//!   validated list query.
//! - User (alias to `user::User`): registered account.

pub mod auth;
pub mod auth_service;
pub mod catalogue_service;
pub mod error;
pub mod medication;
pub mod medication_filter;
pub mod medication_query_service;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::auth::{AuthValidationError, LoginCredentials, PASSWORD_MIN, RegistrationDetails};
pub use self::auth_service::AuthService;
pub use self::catalogue_service::MedicationCatalogueService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::medication::{
    ActiveIngredient, Medication, MedicationDraft, MedicationValidationError, Packaging,
};
pub use self::medication_filter::{
    ALL_ROUTES_SENTINEL, MedicationFilter, MedicationFilterError, MedicationListRequest,
};
pub use self::medication_query_service::MedicationQueryService;
pub use self::trace_id::TraceId;
pub use self::user::{
    Email, PasswordHash, User, UserId, UserName, UserParts, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use medication_api::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such medication"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;

//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST handler, the error schema wrappers from
//! [`crate::inbound::http::schemas`] and the session cookie security scheme.
//! The document backs Swagger UI in debug builds and is exported by the
//! `openapi-dump` binary.

use crate::inbound::http::auth::{LoginRequest, RegisterRequest, UserResponse};
use crate::inbound::http::health::ProbeResponse;
use crate::inbound::http::medications::{
    ActiveIngredientResponse, MedicationPageResponse, MedicationResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/login or /api/v1/auth/register.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Medication lookup API",
        description = "Search the openFDA NDC directory behind session-authenticated endpoints."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::medications::list_medications,
        crate::inbound::http::medications::get_medication,
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::me,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        MedicationPageResponse,
        MedicationResponse,
        ActiveIngredientResponse,
        RegisterRequest,
        LoginRequest,
        UserResponse,
        ProbeResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "medications", description = "Medication catalogue lookups"),
        (name = "auth", description = "Account registration and sessions"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

//! Medication lookup handlers.
//!
//! ```text
//! GET /api/v1/medications?page=1&limit=10&activeIngredient=ibuprofen&route=ORAL
//! GET /api/v1/medications/{id}
//! ```
//!
//! Both endpoints require a signed-in session. Query values arrive as raw
//! strings so non-numeric `page` or `limit` values can be reported with field
//! details instead of a generic deserialisation failure.

use actix_web::{get, web};
use pagination::{PageRequest, Paginated};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, Medication, MedicationListRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_u32_param};

const PAGE: FieldName = FieldName::new("page");
const LIMIT: FieldName = FieldName::new("limit");

/// Query string accepted by `GET /api/v1/medications`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MedicationsQuery {
    /// One-based page number; defaults to 1.
    #[param(example = "1")]
    pub page: Option<String>,
    /// Page size between 1 and 100; defaults to 10.
    #[param(example = "10")]
    pub limit: Option<String>,
    /// Active ingredient search term.
    #[param(example = "ibuprofen")]
    pub active_ingredient: Option<String>,
    /// Administration route; `ALL` disables the route constraint.
    #[param(example = "ORAL")]
    pub route: Option<String>,
    /// Brand or generic name search term.
    #[param(example = "advil")]
    pub name: Option<String>,
}

impl TryFrom<MedicationsQuery> for MedicationListRequest {
    type Error = Error;

    fn try_from(query: MedicationsQuery) -> Result<Self, Self::Error> {
        let defaults = PageRequest::default();
        Ok(Self {
            page: parse_u32_param(query.page, PAGE, defaults.page())?,
            limit: parse_u32_param(query.limit, LIMIT, defaults.limit())?,
            active_ingredient: query.active_ingredient,
            route: query.route,
            name: query.name,
        })
    }
}

/// Active ingredient with its strength.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ActiveIngredientResponse {
    #[schema(example = "IBUPROFEN")]
    pub name: String,
    #[schema(example = "200 mg/1")]
    pub strength: String,
}

/// Medication as exposed to clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MedicationResponse {
    #[schema(example = "0573-0150_6f2b5f0e-4c3a-4d5e-9f1a-2b3c4d5e6f70")]
    pub id: String,
    /// Empty for unbranded products.
    #[schema(example = "Advil")]
    pub brand_name: String,
    #[schema(example = "IBUPROFEN")]
    pub generic_name: String,
    #[schema(example = "Haleon US Holdings LLC")]
    pub labeler_name: String,
    pub active_ingredients: Vec<ActiveIngredientResponse>,
    /// Primary administration route, empty when none is listed.
    #[schema(example = "ORAL")]
    pub route: String,
    /// Package descriptions.
    pub packaging: Vec<String>,
}

impl From<&Medication> for MedicationResponse {
    fn from(medication: &Medication) -> Self {
        Self {
            id: medication.id().to_owned(),
            brand_name: medication.brand_name().unwrap_or_default().to_owned(),
            generic_name: medication.generic_name().to_owned(),
            labeler_name: medication.labeler_name().to_owned(),
            active_ingredients: medication
                .active_ingredients()
                .iter()
                .map(|ingredient| ActiveIngredientResponse {
                    name: ingredient.name().to_owned(),
                    strength: ingredient.strength().to_owned(),
                })
                .collect(),
            route: medication.primary_route().to_owned(),
            packaging: medication
                .packaging_descriptions()
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }
}

/// One page of medications with pagination metadata.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MedicationPageResponse {
    pub medications: Vec<MedicationResponse>,
    /// Matching records, capped at the catalogue's result window.
    #[schema(example = 42)]
    pub total: u64,
    #[schema(example = 1)]
    pub current_page: u32,
    #[schema(example = 5)]
    pub total_pages: u64,
    #[schema(example = true)]
    pub has_more: bool,
}

impl From<Paginated<Medication>> for MedicationPageResponse {
    fn from(page: Paginated<Medication>) -> Self {
        Self {
            total: page.total(),
            current_page: page.current_page(),
            total_pages: page.total_pages(),
            has_more: page.has_more(),
            medications: page.items().iter().map(MedicationResponse::from).collect(),
        }
    }
}

/// Search the medication catalogue.
#[utoipa::path(
    get,
    path = "/api/v1/medications",
    params(MedicationsQuery),
    responses(
        (status = 200, description = "Page of medications", body = MedicationPageResponse),
        (status = 400, description = "Invalid pagination or filter", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 503, description = "Catalogue unavailable", body = ErrorSchema)
    ),
    tags = ["medications"],
    operation_id = "listMedications"
)]
#[get("/medications")]
pub async fn list_medications(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<MedicationsQuery>,
) -> ApiResult<web::Json<MedicationPageResponse>> {
    session.require_user_id()?;
    let request = MedicationListRequest::try_from(query.into_inner())?;
    let page = state.medications.list(request).await?;
    Ok(web::Json(MedicationPageResponse::from(page)))
}

/// Fetch one medication by catalogue product id.
#[utoipa::path(
    get,
    path = "/api/v1/medications/{id}",
    params(("id" = String, Path, description = "Catalogue product identifier")),
    responses(
        (status = 200, description = "Medication", body = MedicationResponse),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Medication not found", body = ErrorSchema),
        (status = 503, description = "Catalogue unavailable", body = ErrorSchema)
    ),
    tags = ["medications"],
    operation_id = "getMedication"
)]
#[get("/medications/{id}")]
pub async fn get_medication(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<MedicationResponse>> {
    session.require_user_id()?;
    let id = path.into_inner();
    let medication = state.medication_detail.detail(&id).await?;
    Ok(web::Json(MedicationResponse::from(&medication)))
}

#[cfg(test)]
mod tests;

//! DTOs for decoding openFDA NDC responses.
//!
//! The adapter decodes into these transport DTOs first, then maps into domain
//! [`Medication`] values in one pass. Unknown fields are ignored.

use serde::Deserialize;

use crate::domain::{ActiveIngredient, Medication, MedicationDraft, Packaging};

#[derive(Debug, Deserialize)]
pub(super) struct NdcResponseDto {
    pub(super) meta: NdcMetaDto,
    pub(super) results: Vec<NdcProductDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct NdcMetaDto {
    pub(super) results: NdcResultsMetaDto,
}

#[derive(Debug, Deserialize)]
#[expect(dead_code, reason = "skip and limit are validated but not consumed")]
pub(super) struct NdcResultsMetaDto {
    pub(super) total: u64,
    pub(super) skip: u64,
    pub(super) limit: u64,
}

#[derive(Debug, Deserialize)]
pub(super) struct NdcProductDto {
    product_id: String,
    #[serde(default)]
    brand_name: Option<String>,
    generic_name: String,
    labeler_name: String,
    active_ingredients: Vec<NdcIngredientDto>,
    #[serde(default)]
    route: Vec<String>,
    #[serde(default)]
    packaging: Vec<NdcPackagingDto>,
}

#[derive(Debug, Deserialize)]
struct NdcIngredientDto {
    name: String,
    strength: String,
}

#[derive(Debug, Deserialize)]
struct NdcPackagingDto {
    description: String,
    #[serde(default)]
    marketing_start_date: Option<String>,
    #[serde(default)]
    marketing_end_date: Option<String>,
    #[serde(default)]
    sample: Option<bool>,
}

impl NdcResponseDto {
    pub(super) fn into_medications(self) -> Result<Vec<Medication>, String> {
        self.results
            .into_iter()
            .map(NdcProductDto::into_medication)
            .collect()
    }
}

impl NdcProductDto {
    fn into_medication(self) -> Result<Medication, String> {
        let draft = MedicationDraft {
            id: self.product_id,
            brand_name: self.brand_name,
            generic_name: self.generic_name,
            labeler_name: self.labeler_name,
            active_ingredients: self
                .active_ingredients
                .into_iter()
                .map(|ingredient| ActiveIngredient::new(ingredient.name, ingredient.strength))
                .collect(),
            routes: self.route,
            packaging: self
                .packaging
                .into_iter()
                .map(|package| Packaging {
                    description: package.description,
                    marketing_start_date: package.marketing_start_date,
                    marketing_end_date: package.marketing_end_date,
                    is_sample: package.sample,
                })
                .collect(),
        };
        Medication::new(draft).map_err(|err| err.to_string())
    }
}

//! Medication entity built from openFDA NDC product records.
//!
//! Medications are immutable snapshots. They are rebuilt from the catalogue on
//! every request and never persisted locally.

use thiserror::Error;

/// One active ingredient and its labelled strength.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveIngredient {
    name: String,
    strength: String,
}

impl ActiveIngredient {
    /// Build an ingredient from its name and strength.
    pub fn new(name: impl Into<String>, strength: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            strength: strength.into(),
        }
    }

    /// Ingredient name, e.g. `IBUPROFEN`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Labelled strength, e.g. `200 mg/1`.
    pub fn strength(&self) -> &str {
        &self.strength
    }
}

/// One packaging configuration of a product.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Packaging {
    /// Human-readable package description.
    pub description: String,
    /// Marketing start date as reported by the catalogue (`YYYYMMDD`).
    pub marketing_start_date: Option<String>,
    /// Marketing end date as reported by the catalogue (`YYYYMMDD`).
    pub marketing_end_date: Option<String>,
    /// Whether the package is a free sample.
    pub is_sample: Option<bool>,
}

/// Raw fields used to build a [`Medication`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MedicationDraft {
    /// Catalogue product identifier.
    pub id: String,
    /// Brand name, absent for unbranded generics.
    pub brand_name: Option<String>,
    /// Generic name.
    pub generic_name: String,
    /// Labeler (manufacturer or distributor) name.
    pub labeler_name: String,
    /// Active ingredients in label order.
    pub active_ingredients: Vec<ActiveIngredient>,
    /// Administration routes; the first is primary.
    pub routes: Vec<String>,
    /// Packaging configurations.
    pub packaging: Vec<Packaging>,
}

/// Validation failures raised by [`Medication::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MedicationValidationError {
    /// The product identifier was blank.
    #[error("medication id must not be empty")]
    EmptyId,
}

/// A medication product from the catalogue.
///
/// ## Invariants
/// - `id` is non-empty.
/// - `routes` keeps catalogue order; [`Medication::primary_route`] is the
///   first entry or `""`.
///
/// # Examples
/// ```
/// use medication_api::domain::{ActiveIngredient, Medication, MedicationDraft};
///
/// let medication = Medication::new(MedicationDraft {
///     id: "0002-1200".into(),
///     generic_name: "ibuprofen".into(),
///     labeler_name: "Acme".into(),
///     active_ingredients: vec![ActiveIngredient::new("IBUPROFEN", "200 mg/1")],
///     routes: vec!["ORAL".into()],
///     ..MedicationDraft::default()
/// })
/// .expect("valid draft");
/// assert_eq!(medication.primary_route(), "ORAL");
/// assert_eq!(medication.brand_name(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Medication {
    id: String,
    brand_name: Option<String>,
    generic_name: String,
    labeler_name: String,
    active_ingredients: Vec<ActiveIngredient>,
    routes: Vec<String>,
    packaging: Vec<Packaging>,
}

impl Medication {
    /// Validate a draft and build the entity.
    pub fn new(draft: MedicationDraft) -> Result<Self, MedicationValidationError> {
        let MedicationDraft {
            id,
            brand_name,
            generic_name,
            labeler_name,
            active_ingredients,
            routes,
            packaging,
        } = draft;
        if id.trim().is_empty() {
            return Err(MedicationValidationError::EmptyId);
        }
        Ok(Self {
            id,
            brand_name: brand_name.filter(|name| !name.trim().is_empty()),
            generic_name,
            labeler_name,
            active_ingredients,
            routes,
            packaging,
        })
    }

    /// Catalogue product identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Brand name when the product has one.
    pub fn brand_name(&self) -> Option<&str> {
        self.brand_name.as_deref()
    }

    /// Generic name.
    pub fn generic_name(&self) -> &str {
        &self.generic_name
    }

    /// Labeler name.
    pub fn labeler_name(&self) -> &str {
        &self.labeler_name
    }

    /// Active ingredients in label order.
    pub fn active_ingredients(&self) -> &[ActiveIngredient] {
        &self.active_ingredients
    }

    /// All administration routes.
    pub fn routes(&self) -> &[String] {
        &self.routes
    }

    /// First listed route, or `""` when none is listed.
    pub fn primary_route(&self) -> &str {
        self.routes.first().map_or("", String::as_str)
    }

    /// Packaging configurations.
    pub fn packaging(&self) -> &[Packaging] {
        &self.packaging
    }

    /// Package descriptions in catalogue order.
    pub fn packaging_descriptions(&self) -> Vec<&str> {
        self.packaging
            .iter()
            .map(|package| package.description.as_str())
            .collect()
    }
}

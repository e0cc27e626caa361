//! Tests for the medication use-case service.

use std::sync::Arc;

use mockall::predicate::eq;
use pagination::{PageRequest, Paginated};
use rstest::rstest;

use super::*;
use crate::domain::ports::MockMedicationCatalogue;
use crate::domain::{ErrorCode, MedicationDraft};

fn empty_page(request: PageRequest) -> Paginated<Medication> {
    Paginated::new(Vec::new(), 0, request)
}

fn list_request(
    active_ingredient: Option<&str>,
    route: Option<&str>,
    name: Option<&str>,
) -> MedicationListRequest {
    MedicationListRequest {
        active_ingredient: active_ingredient.map(str::to_owned),
        route: route.map(str::to_owned),
        name: name.map(str::to_owned),
        ..MedicationListRequest::default()
    }
}

fn service(catalogue: MockMedicationCatalogue) -> MedicationQueryService<MockMedicationCatalogue> {
    MedicationQueryService::new(Arc::new(catalogue))
}

#[tokio::test]
async fn ingredient_and_route_use_the_combined_variant() {
    let mut catalogue = MockMedicationCatalogue::new();
    catalogue
        .expect_search_by_ingredient_and_route()
        .with(eq("ibuprofen"), eq("ORAL"), eq(PageRequest::default()))
        .times(1)
        .returning(|_, _, page| Ok(empty_page(page)));

    service(catalogue)
        .list(list_request(Some("ibuprofen"), Some("ORAL"), None))
        .await
        .expect("list succeeds");
}

#[tokio::test]
async fn ingredient_alone_uses_the_ingredient_variant() {
    let mut catalogue = MockMedicationCatalogue::new();
    catalogue
        .expect_search_by_active_ingredient()
        .with(eq("aspirin"), eq(PageRequest::default()))
        .times(1)
        .returning(|_, page| Ok(empty_page(page)));

    service(catalogue)
        .list(list_request(Some("aspirin"), None, None))
        .await
        .expect("list succeeds");
}

#[tokio::test]
async fn route_alone_uses_the_route_variant() {
    let mut catalogue = MockMedicationCatalogue::new();
    catalogue
        .expect_filter_by_route()
        .with(eq("TOPICAL"), eq(PageRequest::default()))
        .times(1)
        .returning(|_, page| Ok(empty_page(page)));

    service(catalogue)
        .list(list_request(None, Some("TOPICAL"), None))
        .await
        .expect("list succeeds");
}

#[rstest]
#[case::upper("ALL")]
#[case::lower("all")]
#[case::padded("  All ")]
#[tokio::test]
async fn all_sentinel_falls_through_to_generic_listing(#[case] route: &str) {
    let mut catalogue = MockMedicationCatalogue::new();
    catalogue.expect_filter_by_route().times(0);
    catalogue
        .expect_get_medications()
        .withf(|filter| filter.route().is_none() && filter.name() == Some("advil"))
        .times(1)
        .returning(|filter| Ok(empty_page(filter.page())));

    service(catalogue)
        .list(list_request(None, Some(route), Some("advil")))
        .await
        .expect("list succeeds");
}

#[tokio::test]
async fn ingredient_with_all_sentinel_uses_the_ingredient_variant() {
    let mut catalogue = MockMedicationCatalogue::new();
    catalogue.expect_search_by_ingredient_and_route().times(0);
    catalogue
        .expect_search_by_active_ingredient()
        .times(1)
        .returning(|_, page| Ok(empty_page(page)));

    service(catalogue)
        .list(list_request(Some("ibuprofen"), Some("ALL"), None))
        .await
        .expect("list succeeds");
}

#[rstest]
#[case::page_zero(0, 10, "page", "page_out_of_range", 0)]
#[case::limit_zero(1, 0, "limit", "limit_out_of_range", 0)]
#[case::limit_too_large(1, 101, "limit", "limit_out_of_range", 101)]
#[tokio::test]
async fn invalid_paging_is_rejected_before_any_catalogue_call(
    #[case] page: u32,
    #[case] limit: u32,
    #[case] field: &str,
    #[case] code: &str,
    #[case] value: u32,
) {
    let catalogue = MockMedicationCatalogue::new();
    let request = MedicationListRequest {
        page,
        limit,
        ..MedicationListRequest::default()
    };

    let error = service(catalogue)
        .list(request)
        .await
        .expect_err("validation fails");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let details = error.details().expect("details present");
    assert_eq!(details["field"], field);
    assert_eq!(details["code"], code);
    assert_eq!(details["value"], value);
}

#[rstest]
#[case::fetch(CatalogueErrorKind::FetchError, ErrorCode::ServiceUnavailable)]
#[case::invalid(CatalogueErrorKind::InvalidFilter, ErrorCode::InvalidRequest)]
#[case::missing(CatalogueErrorKind::NotFound, ErrorCode::NotFound)]
#[tokio::test]
async fn catalogue_errors_map_to_domain_codes(
    #[case] kind: CatalogueErrorKind,
    #[case] expected: ErrorCode,
) {
    let mut catalogue = MockMedicationCatalogue::new();
    catalogue
        .expect_get_medications()
        .returning(move |_| Err(CatalogueError::new(kind, "Failed to fetch medications: down")));

    let error = service(catalogue)
        .list(MedicationListRequest::default())
        .await
        .expect_err("catalogue failure");

    assert_eq!(error.code(), expected);
    assert_eq!(error.message(), "Failed to fetch medications: down");
}

#[tokio::test]
async fn detail_returns_the_medication() {
    let medication = Medication::new(MedicationDraft {
        id: "0002-1200".into(),
        generic_name: "IBUPROFEN".into(),
        labeler_name: "Acme".into(),
        ..MedicationDraft::default()
    })
    .expect("valid medication");
    let expected = medication.clone();

    let mut catalogue = MockMedicationCatalogue::new();
    catalogue
        .expect_get_medication_by_id()
        .with(eq("0002-1200"))
        .return_once(move |_| Ok(Some(medication)));

    let found = service(catalogue)
        .detail(" 0002-1200 ")
        .await
        .expect("detail succeeds");
    assert_eq!(found, expected);
}

#[tokio::test]
async fn detail_maps_absence_to_not_found() {
    let mut catalogue = MockMedicationCatalogue::new();
    catalogue
        .expect_get_medication_by_id()
        .return_once(|_| Ok(None));

    let error = service(catalogue)
        .detail("missing")
        .await
        .expect_err("absent");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Medication not found");
}

#[tokio::test]
async fn detail_rejects_blank_ids() {
    let mut catalogue = MockMedicationCatalogue::new();
    catalogue.expect_get_medication_by_id().times(0);

    let error = service(catalogue)
        .detail("   ")
        .await
        .expect_err("blank id");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

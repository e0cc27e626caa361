//! Handler tests for the medication endpoints.

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, test, web};
use rstest::{fixture, rstest};
use serde_json::Value;

use super::*;
use crate::domain::{ActiveIngredient, MedicationDraft, Packaging, UserId};
use crate::inbound::http::error::query_error_handler;
use crate::inbound::http::test_utils::{MockPorts, session_cookie, test_session_middleware};

#[fixture]
fn ibuprofen() -> Medication {
    Medication::new(MedicationDraft {
        id: "0573-0150_abc".to_owned(),
        brand_name: None,
        generic_name: "IBUPROFEN".to_owned(),
        labeler_name: "Haleon US Holdings LLC".to_owned(),
        active_ingredients: vec![ActiveIngredient::new("IBUPROFEN", "200 mg/1")],
        routes: vec!["ORAL".to_owned(), "TOPICAL".to_owned()],
        packaging: vec![Packaging {
            description: "50 TABLET in 1 BOTTLE".to_owned(),
            ..Packaging::default()
        }],
    })
    .expect("valid medication")
}

async fn sign_in(session: SessionContext) -> ApiResult<HttpResponse> {
    session.persist_user(&UserId::random())?;
    Ok(HttpResponse::Ok().finish())
}

fn test_app(
    ports: MockPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .wrap(test_session_middleware())
        .route("/test/sign-in", web::post().to(sign_in))
        .service(
            web::scope("/api/v1")
                .service(list_medications)
                .service(get_medication),
        )
}

async fn signed_in_cookie<S>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::post().uri("/test/sign-in").to_request(),
    )
    .await;
    session_cookie(&res).expect("session cookie")
}

async fn get_json<S>(app: &S, uri: &str, cookie: Option<Cookie<'static>>) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let mut req = test::TestRequest::get().uri(uri);
    if let Some(cookie) = cookie {
        req = req.cookie(cookie);
    }
    let res = test::call_service(app, req.to_request()).await;
    let status = res.status();
    let body: Value = test::read_body_json(res).await;
    (status, body)
}

#[rstest]
#[case::list("/api/v1/medications")]
#[case::detail("/api/v1/medications/0573-0150_abc")]
#[actix_web::test]
async fn endpoints_require_a_session(#[case] uri: &str) {
    let app = test::init_service(test_app(MockPorts::default())).await;

    let (status, body) = get_json(&app, uri, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
}

#[rstest]
#[actix_web::test]
async fn list_forwards_filters_and_shapes_the_page(ibuprofen: Medication) {
    let mut ports = MockPorts::default();
    ports
        .medications
        .expect_list()
        .withf(|request| {
            request.page == 2
                && request.limit == 5
                && request.active_ingredient.as_deref() == Some("ibuprofen")
                && request.route.as_deref() == Some("ORAL")
                && request.name.is_none()
        })
        .times(1)
        .return_once(move |request| {
            let page = PageRequest::new(request.page, request.limit).expect("valid page");
            Ok(Paginated::new(vec![ibuprofen], 42, page))
        });
    let app = test::init_service(test_app(ports)).await;
    let cookie = signed_in_cookie(&app).await;

    let (status, body) = get_json(
        &app,
        "/api/v1/medications?page=2&limit=5&activeIngredient=ibuprofen&route=ORAL",
        Some(cookie),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 42);
    assert_eq!(body["currentPage"], 2);
    assert_eq!(body["totalPages"], 9);
    assert_eq!(body["hasMore"], true);
    let first = &body["medications"][0];
    assert_eq!(first["brandName"], "");
    assert_eq!(first["genericName"], "IBUPROFEN");
    assert_eq!(first["route"], "ORAL");
    assert_eq!(first["packaging"][0], "50 TABLET in 1 BOTTLE");
    assert_eq!(first["activeIngredients"][0]["strength"], "200 mg/1");
}

#[actix_web::test]
async fn list_applies_default_paging() {
    let mut ports = MockPorts::default();
    ports
        .medications
        .expect_list()
        .withf(|request| request.page == 1 && request.limit == 10)
        .times(1)
        .return_once(|_| Ok(Paginated::new(Vec::new(), 0, PageRequest::default())));
    let app = test::init_service(test_app(ports)).await;
    let cookie = signed_in_cookie(&app).await;

    let (status, body) = get_json(&app, "/api/v1/medications", Some(cookie)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["medications"], Value::Array(Vec::new()));
    assert_eq!(body["totalPages"], 0);
    assert_eq!(body["hasMore"], false);
}

#[rstest]
#[case::page("/api/v1/medications?page=two", "page", "two")]
#[case::limit("/api/v1/medications?limit=-3", "limit", "-3")]
#[actix_web::test]
async fn list_rejects_non_numeric_paging(
    #[case] uri: &str,
    #[case] field: &str,
    #[case] value: &str,
) {
    let app = test::init_service(test_app(MockPorts::default())).await;
    let cookie = signed_in_cookie(&app).await;

    let (status, body) = get_json(&app, uri, Some(cookie)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], "invalid_integer");
    assert_eq!(body["details"]["value"], value);
}

#[actix_web::test]
async fn list_surfaces_catalogue_outages() {
    let mut ports = MockPorts::default();
    ports
        .medications
        .expect_list()
        .times(1)
        .return_once(|_| Err(Error::service_unavailable("Failed to fetch medications: timeout")));
    let app = test::init_service(test_app(ports)).await;
    let cookie = signed_in_cookie(&app).await;

    let (status, body) = get_json(&app, "/api/v1/medications", Some(cookie)).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "service_unavailable");
}

#[rstest]
#[actix_web::test]
async fn detail_returns_the_medication(ibuprofen: Medication) {
    let mut ports = MockPorts::default();
    ports
        .medication_detail
        .expect_detail()
        .withf(|id| id == "0573-0150_abc")
        .times(1)
        .return_once(move |_| Ok(ibuprofen));
    let app = test::init_service(test_app(ports)).await;
    let cookie = signed_in_cookie(&app).await;

    let (status, body) = get_json(&app, "/api/v1/medications/0573-0150_abc", Some(cookie)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "0573-0150_abc");
    assert_eq!(body["labelerName"], "Haleon US Holdings LLC");
}

#[actix_web::test]
async fn detail_reports_unknown_ids_as_not_found() {
    let mut ports = MockPorts::default();
    ports
        .medication_detail
        .expect_detail()
        .times(1)
        .return_once(|_| Err(Error::not_found("Medication not found")));
    let app = test::init_service(test_app(ports)).await;
    let cookie = signed_in_cookie(&app).await;

    let (status, body) = get_json(&app, "/api/v1/medications/missing", Some(cookie)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Medication not found");
}

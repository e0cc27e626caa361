//! Handler tests for the account endpoints.

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::{Email, PasswordHash, UserId, UserName, UserParts};
use crate::inbound::http::error::json_error_handler;
use crate::inbound::http::test_utils::{MockPorts, session_cookie, test_session_middleware};

#[fixture]
fn ada() -> User {
    let at = Utc
        .with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
        .single()
        .expect("valid timestamp");
    User::from_parts(UserParts {
        id: UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id"),
        email: Email::new("ada@example.com").expect("valid email"),
        name: UserName::new("Ada Lovelace").expect("valid name"),
        password_hash: PasswordHash::new("$2b$10$stored"),
        created_at: at,
        updated_at: at,
    })
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
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(test_session_middleware())
        .service(
            web::scope("/api/v1")
                .service(register)
                .service(login)
                .service(logout)
                .service(me),
        )
}

fn post_json(uri: &str, body: Value) -> test::TestRequest {
    test::TestRequest::post().uri(uri).set_json(body)
}

#[rstest]
#[actix_web::test]
async fn register_creates_a_session_for_the_new_user(ada: User) {
    let mut ports = MockPorts::default();
    let created = ada.clone();
    ports
        .registration
        .expect_register()
        .withf(|details| {
            details.email().as_ref() == "ada@example.com"
                && details.name().as_ref() == "Ada Lovelace"
                && details.password() == "correct horse"
        })
        .times(1)
        .return_once(move |_| Ok(created));
    let profile = ada.clone();
    ports
        .profile
        .expect_fetch_profile()
        .withf(|id| id.to_string() == "3fa85f64-5717-4562-b3fc-2c963f66afa6")
        .times(1)
        .return_once(move |_| Ok(profile));
    let app = test::init_service(test_app(ports)).await;

    let res = test::call_service(
        &app,
        post_json(
            "/api/v1/auth/register",
            json!({"email": "Ada@Example.com", "password": "correct horse", "name": "Ada Lovelace"}),
        )
        .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let cookie = session_cookie(&res).expect("session cookie");
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["name"], "Ada Lovelace");
    assert!(body.get("passwordHash").is_none());

    let me_res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(me_res.status(), StatusCode::OK);
    let me_body: Value = test::read_body_json(me_res).await;
    assert_eq!(me_body["id"], "3fa85f64-5717-4562-b3fc-2c963f66afa6");
}

#[rstest]
#[case::missing_email(json!({"password": "secret1", "name": "Ada"}), "email", "missing_field")]
#[case::missing_name(json!({"email": "ada@example.com", "password": "secret1"}), "name", "missing_field")]
#[case::bad_email(json!({"email": "nope", "password": "secret1", "name": "Ada"}), "email", "invalid_email")]
#[case::short_password(json!({"email": "ada@example.com", "password": "abc", "name": "Ada"}), "password", "password_too_short")]
#[case::short_name(json!({"email": "ada@example.com", "password": "secret1", "name": "A"}), "name", "name_too_short")]
#[actix_web::test]
async fn register_rejects_invalid_payloads(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = test::init_service(test_app(MockPorts::default())).await;

    let res =
        test::call_service(&app, post_json("/api/v1/auth/register", payload).to_request()).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[actix_web::test]
async fn register_reports_taken_emails_as_conflicts() {
    let mut ports = MockPorts::default();
    ports
        .registration
        .expect_register()
        .times(1)
        .return_once(|_| Err(Error::conflict("Email already registered")));
    let app = test::init_service(test_app(ports)).await;

    let res = test::call_service(
        &app,
        post_json(
            "/api/v1/auth/register",
            json!({"email": "ada@example.com", "password": "secret1", "name": "Ada"}),
        )
        .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert!(session_cookie(&res).is_none());
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Email already registered");
}

#[rstest]
#[actix_web::test]
async fn login_returns_the_user_and_sets_a_cookie(ada: User) {
    let mut ports = MockPorts::default();
    ports
        .login
        .expect_authenticate()
        .withf(|creds| creds.email().as_ref() == "ada@example.com" && creds.password() == "secret1")
        .times(1)
        .return_once(move |_| Ok(ada));
    let app = test::init_service(test_app(ports)).await;

    let res = test::call_service(
        &app,
        post_json(
            "/api/v1/auth/login",
            json!({"email": "ada@example.com", "password": "secret1"}),
        )
        .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(session_cookie(&res).is_some());
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["name"], "Ada Lovelace");
}

#[actix_web::test]
async fn login_with_bad_credentials_is_unauthorised() {
    let mut ports = MockPorts::default();
    ports
        .login
        .expect_authenticate()
        .times(1)
        .return_once(|_| Err(Error::unauthorized("Invalid credentials")));
    let app = test::init_service(test_app(ports)).await;

    let res = test::call_service(
        &app,
        post_json(
            "/api/v1/auth/login",
            json!({"email": "ada@example.com", "password": "wrong-pass"}),
        )
        .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&res).is_none());
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Invalid credentials");
}

#[actix_web::test]
async fn login_rejects_malformed_json() {
    let app = test::init_service(test_app(MockPorts::default())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"email\": ")
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
}

#[rstest]
#[actix_web::test]
async fn logout_expires_the_session(ada: User) {
    let mut ports = MockPorts::default();
    ports
        .login
        .expect_authenticate()
        .times(1)
        .return_once(move |_| Ok(ada));
    let app = test::init_service(test_app(ports)).await;
    let login_res = test::call_service(
        &app,
        post_json(
            "/api/v1/auth/login",
            json!({"email": "ada@example.com", "password": "secret1"}),
        )
        .to_request(),
    )
    .await;
    let cookie = session_cookie(&login_res).expect("session cookie");

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let removal = session_cookie(&res).expect("removal cookie");
    assert_eq!(removal.value(), "");
}

#[actix_web::test]
async fn logout_without_a_session_still_succeeds() {
    let app = test::init_service(test_app(MockPorts::default())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/logout")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn me_requires_a_session() {
    let app = test::init_service(test_app(MockPorts::default())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/auth/me").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "login required");
}

//! Handler tests for registration and login.

use super::*;
use crate::domain::{BloodType, DonorId, INVALID_CREDENTIALS_MESSAGE, LoginOutcome};
use crate::inbound::http::test_utils::MockPorts;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use chrono::{DateTime, Utc};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

async fn post_json(ports: MockPorts, uri: &str, body: Value) -> (StatusCode, Value) {
    let app = actix_test::init_service(
        App::new()
            .app_data(ports.into_state())
            .service(web::scope("/api").service(register).service(login)),
    )
    .await;
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .set_json(&body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    let status = response.status();
    let bytes = actix_test::read_body(response).await;
    let value = serde_json::from_slice(&bytes).expect("JSON body");
    (status, value)
}

#[fixture]
fn registration_body() -> Value {
    json!({
        "name": "Rajesh Kumar",
        "email": "rajesh@gmail.com",
        "password": "password123",
        "age": 28,
        "bloodType": "O+",
        "address": "Andheri West, Mumbai, Maharashtra",
        "phone": "+91-9876543210",
        "isDonor": true
    })
}

#[fixture]
fn profile() -> DonorProfile {
    DonorProfile {
        id: 1,
        name: "Rajesh Kumar".to_owned(),
        email: "rajesh@gmail.com".to_owned(),
        age: 28,
        blood_type: BloodType::OPositive,
        address: "Andheri West, Mumbai, Maharashtra".to_owned(),
        phone: "+91-9876543210".to_owned(),
        is_donor: true,
        latitude: Some(19.1364),
        longitude: Some(72.8296),
        created_at: DateTime::<Utc>::UNIX_EPOCH,
    }
}

#[rstest]
#[actix_web::test]
async fn register_returns_created_with_user_id(registration_body: Value) {
    let mut ports = MockPorts::default();
    ports
        .registration
        .expect_register()
        .withf(|request| request.email().to_string() == "rajesh@gmail.com")
        .times(1)
        .return_once(|_| Ok(DonorId::new(7)));

    let (status, body) = post_json(ports, "/api/register", registration_body).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], REGISTERED_MESSAGE);
    assert_eq!(body["userId"], 7);
}

#[rstest]
#[case(json!("30"))]
#[case(json!(" 30 "))]
#[case(json!(30))]
#[actix_web::test]
async fn register_accepts_numeric_or_string_age(mut registration_body: Value, #[case] age: Value) {
    registration_body["age"] = age;
    let mut ports = MockPorts::default();
    ports
        .registration
        .expect_register()
        .times(1)
        .return_once(|_| Ok(DonorId::new(1)));

    let (status, _) = post_json(ports, "/api/register", registration_body).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[rstest]
#[case("name")]
#[case("email")]
#[case("password")]
#[case("age")]
#[case("bloodType")]
#[case("address")]
#[case("phone")]
#[actix_web::test]
async fn register_rejects_missing_fields(mut registration_body: Value, #[case] field: &str) {
    registration_body
        .as_object_mut()
        .expect("object body")
        .remove(field);

    let (status, body) = post_json(MockPorts::default(), "/api/register", registration_body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], MISSING_FIELDS_MESSAGE);
    assert_eq!(body["details"]["field"], field);
}

#[rstest]
#[case(json!(17))]
#[case(json!(66))]
#[case(json!("70"))]
#[actix_web::test]
async fn register_rejects_out_of_range_age(mut registration_body: Value, #[case] age: Value) {
    registration_body["age"] = age;

    let (status, body) = post_json(MockPorts::default(), "/api/register", registration_body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Age must be between 18 and 65");
    assert_eq!(body["details"]["code"], "age_out_of_range");
}

#[rstest]
#[actix_web::test]
async fn register_rejects_non_numeric_age(mut registration_body: Value) {
    registration_body["age"] = json!("twenty");

    let (status, body) = post_json(MockPorts::default(), "/api/register", registration_body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], "invalid_age");
}

#[rstest]
#[actix_web::test]
async fn register_rejects_unknown_blood_type(mut registration_body: Value) {
    registration_body["bloodType"] = json!("C+");

    let (status, body) = post_json(MockPorts::default(), "/api/register", registration_body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "bloodType");
}

#[rstest]
#[actix_web::test]
async fn register_surfaces_duplicate_email(registration_body: Value) {
    let mut ports = MockPorts::default();
    ports
        .registration
        .expect_register()
        .return_once(|_| Err(Error::invalid_request("Email already registered")));

    let (status, body) = post_json(ports, "/api/register", registration_body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email already registered");
}

#[rstest]
#[actix_web::test]
async fn login_returns_token_and_profile(profile: DonorProfile) {
    let mut ports = MockPorts::default();
    ports
        .login
        .expect_login()
        .withf(|creds| creds.email().to_string() == "rajesh@gmail.com")
        .times(1)
        .return_once(move |_| {
            Ok(LoginOutcome {
                token: "signed-token".to_owned(),
                user: profile,
            })
        });

    let (status, body) = post_json(
        ports,
        "/api/login",
        json!({ "email": "rajesh@gmail.com", "password": "password123" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], LOGIN_SUCCESS_MESSAGE);
    assert_eq!(body["token"], "signed-token");
    assert_eq!(body["user"]["email"], "rajesh@gmail.com");
    assert_eq!(body["user"]["bloodType"], "O+");
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("passwordHash").is_none());
}

#[rstest]
#[case(json!({ "password": "password123" }), "email")]
#[case(json!({ "email": "rajesh@gmail.com" }), "password")]
#[case(json!({ "email": "  ", "password": "password123" }), "email")]
#[actix_web::test]
async fn login_requires_email_and_password(#[case] payload: Value, #[case] field: &str) {
    let (status, body) = post_json(MockPorts::default(), "/api/login", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], MISSING_CREDENTIALS_MESSAGE);
    assert_eq!(body["details"]["field"], field);
}

#[rstest]
#[actix_web::test]
async fn login_surfaces_invalid_credentials() {
    let mut ports = MockPorts::default();
    ports
        .login
        .expect_login()
        .return_once(|_| Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE)));

    let (status, body) = post_json(
        ports,
        "/api/login",
        json!({ "email": "nobody@gmail.com", "password": "wrong" }),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], INVALID_CREDENTIALS_MESSAGE);
}

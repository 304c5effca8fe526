//! End-to-end HTTP tests for the donor directory.
//!
//! Runs the full route table with the in-memory repository, a lookup-table
//! geocoder and a trivial password hasher so no network or database is
//! needed.

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use donex::Trace;
use donex::domain::ports::{
    GeocodedAddress, Geocoder, GeocoderError, PasswordHashError, PasswordHasher, TokenIssuer,
};
use donex::domain::{
    Coordinates, CredentialLoginService, DonorSearchService, PasswordHash, RegistrationService,
    TRACE_ID_HEADER,
};
use donex::inbound::http::config::ClientConfig;
use donex::inbound::http::cors::AllowedOrigins;
use donex::inbound::http::health::{HealthState, live, ready};
use donex::inbound::http::routes::api_scope;
use donex::inbound::http::state::{HttpState, HttpStatePorts};
use donex::outbound::memory::InMemoryDonorRepository;
use donex::outbound::security::HmacTokenIssuer;

/// Geocoder backed by a fixed address table; unknown addresses have no match.
struct TableGeocoder(HashMap<&'static str, (f64, f64)>);

#[async_trait]
impl Geocoder for TableGeocoder {
    async fn geocode(&self, address: &str) -> Result<Option<GeocodedAddress>, GeocoderError> {
        if address.contains("offline") {
            return Err(GeocoderError::transport("provider unreachable"));
        }
        Ok(self.0.get(address).map(|&(latitude, longitude)| GeocodedAddress {
            coordinates: Coordinates::try_new(latitude, longitude).expect("table coordinates"),
            place_name: Some(address.to_owned()),
        }))
    }
}

/// Reversible "hash" keeping the tests fast; Argon2 has its own unit tests.
struct PrefixHasher;

#[async_trait]
impl PasswordHasher for PrefixHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        Ok(PasswordHash::new(format!("test${password}")))
    }

    async fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        Ok(hash.as_str() == format!("test${password}"))
    }
}

#[fixture]
fn state() -> web::Data<HttpState> {
    let geocoder = TableGeocoder(HashMap::from([
        ("Andheri West, Mumbai", (19.1364, 72.8296)),
        ("Bandra, Mumbai", (19.0596, 72.8295)),
        ("Pune, Maharashtra", (18.5204, 73.8567)),
        ("Connaught Place, Delhi", (28.6315, 77.2167)),
    ]));
    let repository = Arc::new(InMemoryDonorRepository::new());
    let hasher = Arc::new(PrefixHasher);
    let tokens: Arc<dyn TokenIssuer> = Arc::new(HmacTokenIssuer::new(
        b"integration-secret".to_vec(),
        chrono::Duration::hours(24),
        Arc::new(DefaultClock),
    ));
    web::Data::new(HttpState::new(
        HttpStatePorts {
            registration: Arc::new(RegistrationService::new(
                repository.clone(),
                Arc::new(geocoder),
                hasher.clone(),
                Arc::new(DefaultClock),
            )),
            login: Arc::new(CredentialLoginService::new(
                repository.clone(),
                hasher,
                tokens.clone(),
            )),
            search: Arc::new(DonorSearchService::new(repository)),
            tokens,
        },
        ClientConfig {
            map_tiler_key: Some("browser-key".to_owned()),
        },
    ))
}

struct Reply {
    status: StatusCode,
    trace_id: Option<String>,
    body: Value,
}

async fn send<S, B>(app: &S, request: actix_http::Request) -> Reply
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = test::call_service(app, request).await;
    let status = response.status();
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = test::read_body(response).await;
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    Reply {
        status,
        trace_id,
        body,
    }
}

fn post(uri: &str, body: &Value) -> test::TestRequest {
    test::TestRequest::post().uri(uri).set_json(body)
}

fn registration(name: &str, email: &str, blood_type: &str, address: &str) -> Value {
    json!({
        "name": name,
        "email": email,
        "password": "password123",
        "age": "30",
        "bloodType": blood_type,
        "address": address,
        "phone": "+91-9876543210",
        "isDonor": true
    })
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state)
                .app_data(web::Data::new(HealthState::new()))
                .wrap(Trace)
                .wrap(AllowedOrigins::default().middleware())
                .service(api_scope())
                .service(ready)
                .service(live),
        )
        .await
    };
}

async fn login_token<S, B>(app: &S, email: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let reply = send(
        app,
        post("/api/login", &json!({ "email": email, "password": "password123" })).to_request(),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK, "login failed: {}", reply.body);
    reply.body["token"].as_str().expect("token").to_owned()
}

#[rstest]
#[actix_web::test]
async fn register_login_and_search_nearby_donors(state: web::Data<HttpState>) {
    let app = init_app!(state);
    for (name, email, blood, address) in [
        ("Rajesh Kumar", "rajesh@gmail.com", "O+", "Andheri West, Mumbai"),
        ("Anita Desai", "anita@gmail.com", "O+", "Bandra, Mumbai"),
        ("Meera Joshi", "meera@gmail.com", "O+", "Pune, Maharashtra"),
        ("Priya Sharma", "priya@gmail.com", "A+", "Connaught Place, Delhi"),
        ("Vikram Rao", "vikram@gmail.com", "O+", "Unknown Village"),
    ] {
        let reply = send(
            &app,
            post("/api/register", &registration(name, email, blood, address)).to_request(),
        )
        .await;
        assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
        assert_eq!(reply.body["message"], "User registered successfully");
    }

    let token = login_token(&app, "priya@gmail.com").await;
    let search = |body: Value| {
        post("/api/donors", &body)
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .to_request()
    };

    // Around central Mumbai: Bandra (~5 km) before Andheri (~8.5 km); Pune is ~120 km away.
    let nearby = send(
        &app,
        search(json!({ "bloodType": "O+", "latitude": 19.0760, "longitude": 72.8777, "radius": 20 })),
    )
    .await;
    assert_eq!(nearby.status, StatusCode::OK);
    let donors = nearby.body["donors"].as_array().expect("donors");
    let names: Vec<&str> = donors.iter().filter_map(|d| d["name"].as_str()).collect();
    assert_eq!(names, ["Anita Desai", "Rajesh Kumar"]);
    let distances: Vec<f64> = donors.iter().filter_map(|d| d["distance"].as_f64()).collect();
    assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(distances.iter().all(|&km| km <= 20.0));

    // Without a location every located O+ donor comes back without a distance;
    // the donor whose address could not be geocoded never appears.
    let all = send(&app, search(json!({ "bloodType": "O+" }))).await;
    let donors = all.body["donors"].as_array().expect("donors");
    assert_eq!(donors.len(), 3);
    assert!(donors.iter().all(|d| d.get("distance").is_none()));
    assert!(donors.iter().all(|d| d["name"] != "Vikram Rao"));
    assert!(donors.iter().all(|d| d.get("email").is_none() && d.get("password").is_none()));

    // An origin without a radius ranks every located donor, however far away.
    let unbounded = send(
        &app,
        search(json!({ "latitude": 19.0760, "longitude": 72.8777 })),
    )
    .await;
    assert_eq!(unbounded.status, StatusCode::OK);
    let donors = unbounded.body["donors"].as_array().expect("donors");
    let names: Vec<&str> = donors.iter().filter_map(|d| d["name"].as_str()).collect();
    assert_eq!(names, ["Anita Desai", "Rajesh Kumar", "Meera Joshi", "Priya Sharma"]);
    assert!(donors.iter().all(|d| d["distance"].is_f64()));
}

#[rstest]
#[actix_web::test]
async fn duplicate_email_is_rejected_and_original_still_logs_in(state: web::Data<HttpState>) {
    let app = init_app!(state);
    let body = registration("Rajesh Kumar", "rajesh@gmail.com", "O+", "Andheri West, Mumbai");

    let first = send(&app, post("/api/register", &body).to_request()).await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = send(&app, post("/api/register", &body).to_request()).await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.body["message"], "Email already registered");

    let token = login_token(&app, "rajesh@gmail.com").await;
    assert_eq!(token.split('.').count(), 3);
}

#[rstest]
#[actix_web::test]
async fn geocoding_outage_does_not_block_registration(state: web::Data<HttpState>) {
    let app = init_app!(state);
    let reply = send(
        &app,
        post(
            "/api/register",
            &registration("Sunil Das", "sunil@gmail.com", "B+", "offline district"),
        )
        .to_request(),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED);

    let login = send(
        &app,
        post("/api/login", &json!({ "email": "sunil@gmail.com", "password": "password123" }))
            .to_request(),
    )
    .await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body["user"]["latitude"], Value::Null);
}

#[rstest]
#[actix_web::test]
async fn login_failures_are_indistinguishable(state: web::Data<HttpState>) {
    let app = init_app!(state);
    let body = registration("Rajesh Kumar", "rajesh@gmail.com", "O+", "Andheri West, Mumbai");
    send(&app, post("/api/register", &body).to_request()).await;

    let wrong_password = send(
        &app,
        post("/api/login", &json!({ "email": "rajesh@gmail.com", "password": "nope" }))
            .to_request(),
    )
    .await;
    let unknown_email = send(
        &app,
        post("/api/login", &json!({ "email": "ghost@gmail.com", "password": "password123" }))
            .to_request(),
    )
    .await;

    for reply in [&wrong_password, &unknown_email] {
        assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
        assert_eq!(reply.body["message"], "Invalid email or password");
        assert_eq!(reply.body["code"], "unauthorized");
    }
}

#[rstest]
#[actix_web::test]
async fn search_requires_a_valid_token(state: web::Data<HttpState>) {
    let app = init_app!(state);

    let missing = send(&app, post("/api/donors", &json!({})).to_request()).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.body["message"], "Access denied");
    let trace_id = missing.trace_id.expect("trace id header");
    assert_eq!(missing.body["traceId"], trace_id.as_str());

    let forged = send(
        &app,
        post("/api/donors", &json!({}))
            .insert_header((header::AUTHORIZATION, "Bearer aaa.bbb.ccc"))
            .to_request(),
    )
    .await;
    assert_eq!(forged.status, StatusCode::FORBIDDEN);
    assert_eq!(forged.body["message"], "Invalid token");
}

#[rstest]
#[actix_web::test]
async fn config_and_probes_are_served(state: web::Data<HttpState>) {
    let app = init_app!(state);

    let config = send(&app, test::TestRequest::get().uri("/api/config").to_request()).await;
    assert_eq!(config.status, StatusCode::OK);
    assert_eq!(config.body, json!({ "mapTilerKey": "browser-key" }));

    let live_probe = send(&app, test::TestRequest::get().uri("/health/live").to_request()).await;
    assert_eq!(live_probe.status, StatusCode::OK);

    let ready_probe =
        send(&app, test::TestRequest::get().uri("/health/ready").to_request()).await;
    assert_eq!(ready_probe.status, StatusCode::SERVICE_UNAVAILABLE);
}

#[rstest]
#[actix_web::test]
async fn browser_origins_follow_the_allowlist(state: web::Data<HttpState>) {
    let app = init_app!(state);

    let preflight = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/api/donors")
        .insert_header((header::ORIGIN, "http://localhost:3000"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization,content-type"))
        .to_request();
    let allowed = test::call_service(&app, preflight).await;
    assert_eq!(allowed.status(), StatusCode::OK);
    assert_eq!(
        allowed
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some("http://localhost:3000")
    );

    let foreign = test::TestRequest::get()
        .uri("/api/config")
        .insert_header((header::ORIGIN, "https://elsewhere.example"))
        .to_request();
    let refused = test::call_service(&app, foreign).await;
    assert!(refused.status().is_client_error());
    assert!(!refused.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

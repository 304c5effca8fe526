//! Registration and login handlers.
//!
//! ```text
//! POST /api/register {"name":"Rajesh Kumar","email":"rajesh@gmail.com",...}
//! POST /api/login {"email":"rajesh@gmail.com","password":"password123"}
//! ```
//!
//! Request bodies are decoded leniently (every field optional) so missing
//! fields produce the same `400` payload as blank ones.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    Age, DonorProfile, Error, LoginCredentials, LoginValidationError, RegistrationParts,
    RegistrationRequest, RegistrationValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

pub const REGISTERED_MESSAGE: &str = "User registered successfully";
pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful";
pub const MISSING_FIELDS_MESSAGE: &str = "All fields are required";
pub const MISSING_CREDENTIALS_MESSAGE: &str = "Email and password are required";

/// Age as sent by HTML forms: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum AgeInput {
    Number(i64),
    Text(String),
}

/// Registration request body for `POST /api/register`.
#[derive(Debug, Default, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    #[schema(example = "Rajesh Kumar")]
    pub name: Option<String>,
    #[schema(example = "rajesh@gmail.com")]
    pub email: Option<String>,
    #[schema(example = "password123")]
    pub password: Option<String>,
    pub age: Option<AgeInput>,
    #[schema(example = "O+")]
    pub blood_type: Option<String>,
    #[schema(example = "Andheri West, Mumbai, Maharashtra")]
    pub address: Option<String>,
    #[schema(example = "+91-9876543210")]
    pub phone: Option<String>,
    pub is_donor: Option<bool>,
}

/// Body returned after a successful registration.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    #[schema(example = "User registered successfully")]
    pub message: String,
    #[schema(example = 1)]
    pub user_id: i64,
}

/// Login request body for `POST /api/login`.
#[derive(Debug, Default, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    #[schema(example = "rajesh@gmail.com")]
    pub email: Option<String>,
    #[schema(example = "password123")]
    pub password: Option<String>,
}

/// Body returned after a successful login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = "Login successful")]
    pub message: String,
    /// Bearer token for protected endpoints.
    pub token: String,
    pub user: DonorProfile,
}

fn missing_field(field: &str) -> Error {
    Error::invalid_request(MISSING_FIELDS_MESSAGE)
        .with_details(json!({ "field": field, "code": "missing_field" }))
}

fn parse_age(raw: Option<&AgeInput>) -> Result<i64, Error> {
    match raw {
        None => Err(missing_field("age")),
        Some(AgeInput::Number(years)) => Ok(*years),
        Some(AgeInput::Text(text)) if text.trim().is_empty() => Err(missing_field("age")),
        Some(AgeInput::Text(text)) => text.trim().parse().map_err(|_| {
            Error::invalid_request("Age must be a whole number")
                .with_details(json!({ "field": "age", "code": "invalid_age" }))
        }),
    }
}

fn map_registration_validation_error(err: RegistrationValidationError) -> Error {
    match err {
        RegistrationValidationError::MissingField(field) => missing_field(field),
        RegistrationValidationError::AgeOutOfRange(_) => Error::invalid_request(format!(
            "Age must be between {} and {}",
            Age::MIN,
            Age::MAX
        ))
        .with_details(json!({ "field": "age", "code": "age_out_of_range" })),
        RegistrationValidationError::UnknownBloodType(raw) => {
            Error::invalid_request(format!("Unknown blood type: {raw}"))
                .with_details(json!({ "field": "bloodType", "code": "unknown_blood_type" }))
        }
    }
}

impl TryFrom<RegisterRequest> for RegistrationRequest {
    type Error = Error;

    fn try_from(body: RegisterRequest) -> Result<Self, Self::Error> {
        let age = parse_age(body.age.as_ref())?;
        RegistrationRequest::try_from_parts(RegistrationParts {
            name: body.name.as_deref().unwrap_or_default(),
            email: body.email.as_deref().unwrap_or_default(),
            password: body.password.as_deref().unwrap_or_default(),
            age,
            blood_type: body.blood_type.as_deref().unwrap_or_default(),
            address: body.address.as_deref().unwrap_or_default(),
            phone: body.phone.as_deref().unwrap_or_default(),
            is_donor: body.is_donor.unwrap_or(false),
        })
        .map_err(map_registration_validation_error)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    let field = match err {
        LoginValidationError::EmptyEmail => "email",
        LoginValidationError::EmptyPassword => "password",
    };
    Error::invalid_request(MISSING_CREDENTIALS_MESSAGE)
        .with_details(json!({ "field": field, "code": "missing_field" }))
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = Error;

    fn try_from(body: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            body.email.as_deref().unwrap_or_default(),
            body.password.as_deref().unwrap_or_default(),
        )
        .map_err(map_login_validation_error)
    }
}

/// Register a donor account.
///
/// The address is geocoded best-effort; registration succeeds without
/// coordinates when the provider is unavailable.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Donor registered", body = RegisterResponse),
        (status = 400, description = "Missing fields, invalid age or blood type, or duplicate email", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let request = RegistrationRequest::try_from(payload.into_inner())?;
    let id = state.registration.register(request).await?;
    Ok(HttpResponse::Created().json(RegisterResponse {
        message: REGISTERED_MESSAGE.to_owned(),
        user_id: id.get(),
    }))
}

/// Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Missing email or password", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials = LoginCredentials::try_from(payload.into_inner())?;
    let outcome = state.login.login(&credentials).await?;
    Ok(web::Json(LoginResponse {
        message: LOGIN_SUCCESS_MESSAGE.to_owned(),
        token: outcome.token,
        user: outcome.user,
    }))
}

#[cfg(test)]
mod tests;

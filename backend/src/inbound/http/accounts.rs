//! Account API handlers.
//!
//! ```text
//! POST /api/auth/signup {"username":"alice","email":"alice@x.com","password":"pw123456"}
//! POST /api/auth/login  {"email":"alice@x.com","password":"pw123456"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{AccountValidationError, Error, LoginAttempt, Registration, Session};

use super::ApiResult;
use super::error::ErrorBody;
use super::state::HttpState;

/// Signup request body for `POST /api/auth/signup`.
///
/// Fields default to empty strings so absent keys fail domain validation
/// with the same 400 a blank value does.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SignupRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Identity payload returned by both authentication endpoints.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SessionResponse {
    /// Account identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub username: String,
    /// Normalised email address.
    pub email: String,
    /// Bearer token for subsequent requests.
    pub token: String,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            id: session.account.id().to_string(),
            username: session.account.username().as_ref().to_owned(),
            email: session.account.email().as_ref().to_owned(),
            token: session.token,
        }
    }
}

fn map_validation_error(err: AccountValidationError) -> Error {
    Error::invalid_request(err.to_string())
}

/// Register a new account and log it in.
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = SessionResponse),
        (status = 400, description = "Missing fields or account exists", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/auth/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let SignupRequest {
        username,
        email,
        password,
    } = payload.into_inner();
    let registration = Registration::try_from_parts(&username, &email, &password)
        .map_err(map_validation_error)?;
    let session = state.credentials.register(registration).await?;
    Ok(HttpResponse::Created().json(SessionResponse::from(session)))
}

/// Authenticate an existing account.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = SessionResponse),
        (status = 400, description = "Missing fields", body = ErrorBody),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { email, password } = payload.into_inner();
    let attempt = LoginAttempt::try_from_parts(&email, &password).map_err(map_validation_error)?;
    let session = state.credentials.login(attempt).await?;
    Ok(HttpResponse::Ok().json(SessionResponse::from(session)))
}

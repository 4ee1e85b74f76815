//! Account handlers.
//!
//! ```text
//! POST /register {"username":"doc","password":"123","role":"doctor"}
//! POST /login {"username":"doc","password":"123"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::domain::{CredentialsValidationError, Error, LoginCredentials, Registration, Role};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Registration request body for `POST /register`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "doc")]
    pub username: String,
    #[schema(example = "123")]
    pub password: String,
    #[schema(example = "doctor")]
    pub role: String,
}

/// Account created by `POST /register`. The password hash is never returned.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisterResponse {
    pub id: i64,
    pub username: String,
    #[schema(value_type = String, example = "doctor")]
    pub role: Role,
}

/// Login request body for `POST /login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "doc")]
    pub username: String,
    #[schema(example = "123")]
    pub password: String,
}

/// Token returned by `POST /login`, sent verbatim in `Authorization`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub token: String,
}

fn map_validation_error(err: CredentialsValidationError) -> Error {
    let (field, code) = match &err {
        CredentialsValidationError::EmptyUsername => ("username", "empty_username"),
        CredentialsValidationError::EmptyPassword => ("password", "empty_password"),
        CredentialsValidationError::UnknownRole(_) => ("role", "unknown_role"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// Create an account with a hashed password.
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Invalid body, unknown role or taken username", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<web::Json<RegisterResponse>> {
    let RegisterRequest {
        username,
        password,
        role,
    } = payload.into_inner();
    let registration =
        Registration::try_from_parts(&username, &password, &role).map_err(map_validation_error)?;
    let user = state.credentials.register(&registration).await?;
    info!(user_id = %user.id(), role = %user.role(), "account registered");
    Ok(web::Json(RegisterResponse {
        id: user.id().get(),
        username: user.username().to_owned(),
        role: user.role(),
    }))
}

/// Exchange credentials for a signed access token.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
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
    let credentials = LoginCredentials::try_from_parts(&payload.username, &payload.password)
        .map_err(map_validation_error)?;
    let user = state.credentials.authenticate(&credentials).await?;
    let token = state.tokens.issue(&user).map_err(|err| {
        error!(error = %err, "token signing failed");
        Error::internal("Failed to issue token")
    })?;
    Ok(web::Json(LoginResponse {
        token: token.into_inner(),
    }))
}

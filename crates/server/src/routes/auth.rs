use axum::{extract::State, http::{header::AUTHORIZATION, HeaderMap}, Json};

use service::auth::domain::{AuthSession, LoginInput, RegisterInput};

use crate::errors::ApiError;
use crate::state::ServerState;

#[utoipa::path(
    post, path = "/register", tag = "auth",
    request_body = crate::openapi::RegisterRequest,
    responses(
        (status = 200, description = "Registered", body = crate::openapi::SessionResponse),
        (status = 400, description = "User already exists", body = crate::openapi::MessageResponse),
        (status = 451, description = "Unexpected persistence failure", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn register(State(state): State<ServerState>, Json(input): Json<RegisterInput>) -> Result<Json<AuthSession>, ApiError> {
    let session = state.auth.register(input).await.map_err(ApiError::from_register)?;
    Ok(Json(session))
}

#[utoipa::path(
    post, path = "/login", tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = crate::openapi::SessionResponse),
        (status = 400, description = "Invalid credentials", body = crate::openapi::MessageResponse)
    )
)]
pub async fn login(State(state): State<ServerState>, Json(input): Json<LoginInput>) -> Result<Json<AuthSession>, ApiError> {
    let session = state.auth.login(input).await.map_err(ApiError::from_login)?;
    Ok(Json(session))
}

#[utoipa::path(
    get, path = "/validate", tag = "auth",
    params(("authorization" = String, Header, description = "Token issued by register or login")),
    responses(
        (status = 200, description = "Token valid; a new one is issued", body = crate::openapi::SessionResponse),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn validate(State(state): State<ServerState>, headers: HeaderMap) -> Result<Json<AuthSession>, ApiError> {
    let token = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    let session = state.auth.validate(token).await.map_err(ApiError::from_validate)?;
    Ok(Json(session))
}

//! Esports pass-through handlers. The provider's status and body are
//! replayed as-is.

use std::sync::Arc;

use axum::{extract::{Path, State}, http::StatusCode, response::{IntoResponse, Response}, Json};
use common::esports::ProviderResponse;
use common::CoreError;

use service::esports::EsportsService;

use crate::errors::ApiError;

type Esports = State<Arc<EsportsService>>;

fn relay(res: Result<ProviderResponse, CoreError>) -> Result<Response, ApiError> {
    let resp = res?;
    let status = StatusCode::from_u16(resp.status).map_err(|e| ApiError::Upstream(e.to_string()))?;
    if status.is_informational() || status == StatusCode::NO_CONTENT || status == StatusCode::NOT_MODIFIED {
        return Ok(status.into_response());
    }
    Ok((status, Json(resp.body)).into_response())
}

#[utoipa::path(
    get, path = "/news", tag = "esports",
    responses(
        (status = 200, description = "Latest news; provider status and body are forwarded"),
        (status = 500, description = "Provider unreachable or answered non-JSON", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn news(State(svc): Esports) -> Result<Response, ApiError> {
    relay(svc.news().await)
}

#[utoipa::path(
    get, path = "/matches", tag = "esports",
    responses(
        (status = 200, description = "Upcoming and live matches; provider status and body are forwarded"),
        (status = 500, description = "Provider unreachable or answered non-JSON", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn matches(State(svc): Esports) -> Result<Response, ApiError> {
    relay(svc.matches().await)
}

#[utoipa::path(
    get, path = "/matches/{id}", tag = "esports",
    params(("id" = u32, Path, description = "Match id")),
    responses(
        (status = 200, description = "One match; provider status and body are forwarded"),
        (status = 500, description = "Provider unreachable or answered non-JSON", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn match_by_id(State(svc): Esports, Path(id): Path<u32>) -> Result<Response, ApiError> {
    relay(svc.match_by_id(id).await)
}

#[utoipa::path(
    get, path = "/results", tag = "esports",
    responses(
        (status = 200, description = "Recent results; provider status and body are forwarded"),
        (status = 500, description = "Provider unreachable or answered non-JSON", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn results(State(svc): Esports) -> Result<Response, ApiError> {
    relay(svc.results().await)
}

#[utoipa::path(
    get, path = "/players", tag = "esports",
    responses(
        (status = 200, description = "Player ranking, first 30 entries; provider status and body are forwarded"),
        (status = 500, description = "Provider unreachable or answered non-JSON", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn top_players(State(svc): Esports) -> Result<Response, ApiError> {
    relay(svc.top_players().await)
}

#[utoipa::path(
    get, path = "/players/{id}", tag = "esports",
    params(("id" = u32, Path, description = "Player id")),
    responses(
        (status = 200, description = "One player; provider status and body are forwarded"),
        (status = 500, description = "Provider unreachable or answered non-JSON", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn player(State(svc): Esports, Path(id): Path<u32>) -> Result<Response, ApiError> {
    relay(svc.player(id).await)
}

#[utoipa::path(
    get, path = "/teams", tag = "esports",
    responses(
        (status = 200, description = "Team ranking; provider status and body are forwarded"),
        (status = 500, description = "Provider unreachable or answered non-JSON", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn teams(State(svc): Esports) -> Result<Response, ApiError> {
    relay(svc.teams().await)
}

#[utoipa::path(
    get, path = "/teams/{id}", tag = "esports",
    params(("id" = u32, Path, description = "Team id")),
    responses(
        (status = 200, description = "One team; provider status and body are forwarded"),
        (status = 500, description = "Provider unreachable or answered non-JSON", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn team(State(svc): Esports, Path(id): Path<u32>) -> Result<Response, ApiError> {
    relay(svc.team(id).await)
}

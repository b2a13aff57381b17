use std::sync::Arc;

use axum::{routing::{get, post}, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use service::esports::EsportsService;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod auth;
pub mod esports;
pub mod posts;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

fn esports_routes(svc: Arc<EsportsService>) -> Router {
    Router::new()
        .route("/news", get(esports::news))
        .route("/matches", get(esports::matches))
        .route("/matches/:id", get(esports::match_by_id))
        .route("/results", get(esports::results))
        .route("/players", get(esports::top_players))
        .route("/players/:id", get(esports::player))
        .route("/teams", get(esports::teams))
        .route("/teams/:id", get(esports::team))
        .with_state(svc)
}

/// Build the application router. Esports routes are mounted only when the
/// state carries an esports service.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let esports = state.esports.clone();

    let mut app = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/posts", get(posts::list))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/validate", get(auth::validate))
        .with_state(state);

    if let Some(svc) = esports {
        app = app.merge(esports_routes(svc));
    }

    app.layer(cors).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
            .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
    )
}

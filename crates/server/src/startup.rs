use std::sync::Arc;

use axum::Router;
use chrono::Duration;
use common::esports::HttpEsportsProvider;
use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::auth::{repo::seaorm::SeaOrmAuthRepository, AuthConfig, AuthService};
use service::esports::EsportsService;
use service::posts::{repository::SeaOrmPostRepository, PostService};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

/// Which of the two backends to run. Both share auth and posts; the
/// esports backend also mounts the provider pass-through routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Posts,
    Esports,
}

impl ServiceKind {
    pub fn name(&self) -> &'static str {
        match self {
            ServiceKind::Posts => "posts",
            ServiceKind::Esports => "esports",
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire services over an open connection.
pub fn build_state(kind: ServiceKind, cfg: &AppConfig, db: DatabaseConnection) -> ServerState {
    let auth_cfg = AuthConfig {
        token_ttl: Duration::seconds(cfg.auth.token_ttl_secs),
        bcrypt_cost: cfg.auth.bcrypt_cost,
        ..AuthConfig::new(cfg.auth.jwt_secret.clone())
    };
    let auth = Arc::new(AuthService::new(Arc::new(SeaOrmAuthRepository { db: db.clone() }), auth_cfg));
    let posts = Arc::new(PostService::new(Arc::new(SeaOrmPostRepository { db })));
    let state = ServerState::new(auth, posts);

    match kind {
        ServiceKind::Posts => state,
        ServiceKind::Esports => {
            let provider = HttpEsportsProvider::new(cfg.esports.base_url.clone());
            state.with_esports(Arc::new(EsportsService::new(Arc::new(provider))))
        }
    }
}

pub fn build_app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

/// Public entry: load config, connect, migrate, then serve until the listener fails.
pub async fn run(kind: ServiceKind) -> Result<(), StartupError> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;

    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Database(e.to_string()))?;
        info!(event = "migrations_applied", "database schema up to date");
    }

    let app = build_app(build_state(kind, &cfg, db));

    let addr = cfg.server.bind_addr();
    info!(service = kind.name(), %addr, "starting server");
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(anyhow::Error::from)?;
    axum::serve(listener, app).await.map_err(anyhow::Error::from)?;
    Ok(())
}

//! Client for the external esports statistics provider.
//!
//! Every call is a plain GET against `{base_url}{resource.path()}`; the
//! provider's status code and JSON body are handed back untouched.

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::CoreError;

/// One addressable collection or record on the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EsportsResource {
    News,
    Matches,
    Match(u32),
    Results,
    PlayerRanking,
    Player(u32),
    TeamRanking,
    Team(u32),
}

impl EsportsResource {
    pub fn path(&self) -> String {
        match self {
            EsportsResource::News => "/news".into(),
            EsportsResource::Matches => "/matches".into(),
            EsportsResource::Match(id) => format!("/matches/{id}"),
            EsportsResource::Results => "/results".into(),
            EsportsResource::PlayerRanking => "/players".into(),
            EsportsResource::Player(id) => format!("/players/{id}"),
            EsportsResource::TeamRanking => "/teams".into(),
            EsportsResource::Team(id) => format!("/teams/{id}"),
        }
    }
}

/// What the provider answered, as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl ProviderResponse {
    pub fn ok(body: serde_json::Value) -> Self {
        Self { status: 200, body }
    }
}

#[async_trait]
pub trait EsportsProvider: Send + Sync {
    async fn fetch(&self, resource: EsportsResource) -> Result<ProviderResponse, CoreError>;
}

/// reqwest-backed provider.
#[derive(Clone)]
pub struct HttpEsportsProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpEsportsProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }

    pub fn url_for(&self, resource: EsportsResource) -> String {
        format!("{}{}", self.base_url, resource.path())
    }
}

#[async_trait]
impl EsportsProvider for HttpEsportsProvider {
    async fn fetch(&self, resource: EsportsResource) -> Result<ProviderResponse, CoreError> {
        let url = self.url_for(resource);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CoreError::Network(e.to_string()))?;
        let status = resp.status().as_u16();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| CoreError::Network(e.to_string()))?;
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).map_err(|e| CoreError::Parse(e.to_string()))?
        };
        debug!(%url, status, "esports provider responded");
        Ok(ProviderResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Path, http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    async fn spawn_provider() -> String {
        let app = Router::new()
            .route("/news", get(|| async { Json(json!([{"title": "Major announced"}])) }))
            .route(
                "/teams/:id",
                get(|Path(id): Path<u32>| async move {
                    if id == 6665 {
                        (StatusCode::OK, Json(json!({"id": 6665, "name": "Astralis"})))
                    } else {
                        (StatusCode::NOT_FOUND, Json(json!({"error": "team not found"})))
                    }
                }),
            )
            .route("/results", get(|| async { "not json" }))
            .route("/matches", get(|| async { StatusCode::NO_CONTENT }));
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}/")
    }

    #[test]
    fn resource_paths() {
        assert_eq!(EsportsResource::News.path(), "/news");
        assert_eq!(EsportsResource::Match(42).path(), "/matches/42");
        assert_eq!(EsportsResource::PlayerRanking.path(), "/players");
        assert_eq!(EsportsResource::Team(7).path(), "/teams/7");
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let p = HttpEsportsProvider::new("http://provider.local//");
        assert_eq!(p.url_for(EsportsResource::Player(3)), "http://provider.local/players/3");
    }

    #[tokio::test]
    async fn forwards_body_and_status() {
        let provider = HttpEsportsProvider::new(spawn_provider().await);

        let news = provider.fetch(EsportsResource::News).await.unwrap();
        assert_eq!(news.status, 200);
        assert_eq!(news.body, json!([{"title": "Major announced"}]));

        let team = provider.fetch(EsportsResource::Team(6665)).await.unwrap();
        assert_eq!(team.body["name"], "Astralis");

        let missing = provider.fetch(EsportsResource::Team(1)).await.unwrap();
        assert_eq!(missing.status, 404);
        assert_eq!(missing.body, json!({"error": "team not found"}));
    }

    #[tokio::test]
    async fn empty_body_is_null() {
        let provider = HttpEsportsProvider::new(spawn_provider().await);
        let resp = provider.fetch(EsportsResource::Matches).await.unwrap();
        assert_eq!(resp.status, 204);
        assert!(resp.body.is_null());
    }

    #[tokio::test]
    async fn non_json_body_is_parse_error() {
        let provider = HttpEsportsProvider::new(spawn_provider().await);
        let err = provider.fetch(EsportsResource::Results).await.unwrap_err();
        assert!(matches!(err, CoreError::Parse(_)));
    }

    #[tokio::test]
    async fn unreachable_provider_is_network_error() {
        let listener = std::net::TcpListener::bind(("127.0.0.1", 0)).unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let provider = HttpEsportsProvider::new(format!("http://{addr}"));
        let err = provider.fetch(EsportsResource::News).await.unwrap_err();
        assert!(matches!(err, CoreError::Network(_)));
    }
}

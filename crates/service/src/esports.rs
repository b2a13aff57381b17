//! Esports statistics relay.
//!
//! Thin pass-through over an [`EsportsProvider`]; only the player ranking is
//! reshaped (cut to the top entries).

use std::sync::Arc;

use common::esports::{EsportsProvider, EsportsResource, ProviderResponse};
use common::CoreError;
use serde_json::Value;
use tracing::{instrument, warn};

/// Number of entries kept from the provider's player ranking.
pub const PLAYER_RANKING_LIMIT: usize = 30;

pub struct EsportsService {
    provider: Arc<dyn EsportsProvider>,
}

impl EsportsService {
    pub fn new(provider: Arc<dyn EsportsProvider>) -> Self { Self { provider } }

    pub async fn news(&self) -> Result<ProviderResponse, CoreError> {
        self.relay(EsportsResource::News).await
    }

    pub async fn matches(&self) -> Result<ProviderResponse, CoreError> {
        self.relay(EsportsResource::Matches).await
    }

    pub async fn match_by_id(&self, id: u32) -> Result<ProviderResponse, CoreError> {
        self.relay(EsportsResource::Match(id)).await
    }

    pub async fn results(&self) -> Result<ProviderResponse, CoreError> {
        self.relay(EsportsResource::Results).await
    }

    /// Player ranking limited to the first [`PLAYER_RANKING_LIMIT`] entries.
    ///
    /// Non-success answers and non-array bodies are forwarded unchanged.
    ///
    /// # Examples
    /// ```
    /// use async_trait::async_trait;
    /// use common::{CoreError, esports::{EsportsProvider, EsportsResource, ProviderResponse}};
    /// use service::esports::EsportsService;
    /// use std::sync::Arc;
    ///
    /// struct Ranking;
    /// #[async_trait]
    /// impl EsportsProvider for Ranking {
    ///     async fn fetch(&self, _: EsportsResource) -> Result<ProviderResponse, CoreError> {
    ///         Ok(ProviderResponse::ok(serde_json::json!((1..=50).collect::<Vec<u32>>())))
    ///     }
    /// }
    ///
    /// let svc = EsportsService::new(Arc::new(Ranking));
    /// let top = tokio_test::block_on(svc.top_players()).unwrap();
    /// assert_eq!(top.body.as_array().unwrap().len(), 30);
    /// ```
    #[instrument(skip(self))]
    pub async fn top_players(&self) -> Result<ProviderResponse, CoreError> {
        let mut resp = self.relay(EsportsResource::PlayerRanking).await?;
        if (200..300).contains(&resp.status) {
            if let Value::Array(players) = &mut resp.body {
                players.truncate(PLAYER_RANKING_LIMIT);
            }
        }
        Ok(resp)
    }

    pub async fn player(&self, id: u32) -> Result<ProviderResponse, CoreError> {
        self.relay(EsportsResource::Player(id)).await
    }

    pub async fn teams(&self) -> Result<ProviderResponse, CoreError> {
        self.relay(EsportsResource::TeamRanking).await
    }

    pub async fn team(&self, id: u32) -> Result<ProviderResponse, CoreError> {
        self.relay(EsportsResource::Team(id)).await
    }

    #[instrument(skip(self))]
    async fn relay(&self, resource: EsportsResource) -> Result<ProviderResponse, CoreError> {
        self.provider.fetch(resource).await.map_err(|e| {
            warn!(path = %resource.path(), error = %e, "esports provider failed");
            e
        })
    }
}

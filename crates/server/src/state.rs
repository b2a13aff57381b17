use std::sync::Arc;

use service::auth::AuthService;
use service::esports::EsportsService;
use service::posts::PostService;

/// Shared handler state, built once at startup.
#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService>,
    pub posts: Arc<PostService>,
    /// Present on the esports service only.
    pub esports: Option<Arc<EsportsService>>,
}

impl ServerState {
    pub fn new(auth: Arc<AuthService>, posts: Arc<PostService>) -> Self {
        Self { auth, posts, esports: None }
    }

    pub fn with_esports(mut self, esports: Arc<EsportsService>) -> Self {
        self.esports = Some(esports);
        self
    }
}

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info, instrument, warn};

use super::domain::{AuthSession, LoginInput, NewUser, ProfileScope, RegisterInput, UserProfile};
use super::errors::AuthError;
use super::password::{self, PasswordAlgorithm, DEFAULT_BCRYPT_COST};
use super::repository::AuthRepository;
use super::token::{TokenService, DEFAULT_TTL_SECS};

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub password_algorithm: PasswordAlgorithm,
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// bcrypt at cost 10 and two-hour tokens.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl: Duration::seconds(DEFAULT_TTL_SECS),
            password_algorithm: PasswordAlgorithm::Bcrypt,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }
}

/// Auth business service independent of web framework
pub struct AuthService {
    repo: Arc<dyn AuthRepository>,
    tokens: TokenService,
    cfg: AuthConfig,
}

impl AuthService {
    pub fn new(repo: Arc<dyn AuthRepository>, cfg: AuthConfig) -> Self {
        let tokens = TokenService::new(&cfg.jwt_secret, cfg.token_ttl);
        Self { repo, tokens, cfg }
    }

    pub fn tokens(&self) -> &TokenService { &self.tokens }

    /// Register a new user and issue its first token.
    ///
    /// Rejected with `AuthError::Conflict` when the email or the nickname is taken.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, AuthConfig, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig::new("secret"));
    /// let input = RegisterInput { name: "Test".into(), email: "user@example.com".into(), nickname: "tester".into(), password: "pw".into() };
    /// let session = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(session.user.user.email, "user@example.com");
    /// assert_eq!(svc.tokens().verify(&session.token).unwrap(), session.user.user.id);
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email, nickname = %input.nickname))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthSession, AuthError> {
        let existing = self.repo.find_users_by_email_or_nickname(&input.email, &input.nickname).await?;
        if let Some(found) = existing.first() {
            debug!(user_id = found.id, "user exists");
            return Err(AuthError::Conflict);
        }

        let algorithm = self.cfg.password_algorithm;
        let cost = self.cfg.bcrypt_cost;
        let plain = input.password;
        let hash = tokio::task::spawn_blocking(move || password::hash_password(&plain, algorithm, cost))
            .await
            .map_err(|e| AuthError::HashError(e.to_string()))??;

        let new_user = NewUser { name: input.name, email: input.email, nickname: input.nickname };
        let user = self.repo.create_user(&new_user, hash, algorithm.to_string()).await?;
        let token = self.issue(user.id)?;
        info!(user_id = user.id, email = %user.email, "user_registered");
        Ok(AuthSession { user: UserProfile::fresh(user), token })
    }

    /// Authenticate by email or nickname and issue a token.
    ///
    /// Unknown login and wrong password both yield `AuthError::Unauthorized`.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, AuthConfig, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MockAuthRepository::default()), AuthConfig::new("secret"));
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { name: "N".into(), email: "u@e.com".into(), nickname: "nick".into(), password: "Passw0rd".into() }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { login: "nick".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.user.email, "u@e.com");
    /// ```
    #[instrument(skip(self, input), fields(login = %input.login))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let users = self.repo.find_users_by_login(&input.login).await?;
        let user = users.into_iter().next().ok_or(AuthError::Unauthorized)?;

        let cred = self.repo
            .get_credentials(user.id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let algorithm: PasswordAlgorithm = cred.password_algorithm.parse()?;
        let plain = input.password;
        let stored = cred.password_hash;
        let matches = tokio::task::spawn_blocking(move || password::verify_password(&plain, &stored, algorithm))
            .await
            .map_err(|e| AuthError::HashError(e.to_string()))?;
        if !matches.unwrap_or(false) {
            return Err(AuthError::Unauthorized);
        }

        let profile = self.repo
            .load_profile(user.id, ProfileScope::Full)
            .await?
            .ok_or(AuthError::Unauthorized)?;
        let token = self.issue(user.id)?;
        info!(user_id = user.id, "user_logged_in");
        Ok(AuthSession { user: profile, token })
    }

    /// Check a bearer token and answer with the user and a newly issued token.
    ///
    /// The presented token stays valid until its own expiry.
    #[instrument(skip(self, token))]
    pub async fn validate(&self, token: Option<&str>) -> Result<AuthSession, AuthError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;
        let token = token.strip_prefix("Bearer ").unwrap_or(token);
        let user_id = self.tokens.verify(token).map_err(|e| {
            debug!(error = %e, "token rejected");
            AuthError::InvalidToken(e)
        })?;

        let Some(profile) = self.repo.load_profile(user_id, ProfileScope::PostsOnly).await? else {
            warn!(user_id, "token refers to a missing user");
            return Err(AuthError::NotFound);
        };
        let token = self.issue(profile.user.id)?;
        Ok(AuthSession { user: profile, token })
    }

    fn issue(&self, user_id: i32) -> Result<String, AuthError> {
        self.tokens.issue(user_id).map_err(|e| AuthError::TokenIssue(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::domain::RegisterInput;
    use crate::auth::repository::mock::MockAuthRepository;
    use crate::auth::token::TokenError;

    fn cfg() -> AuthConfig {
        AuthConfig { bcrypt_cost: 4, ..AuthConfig::new("test-secret") }
    }

    fn svc() -> (Arc<MockAuthRepository>, AuthService) {
        let repo = Arc::new(MockAuthRepository::default());
        (repo.clone(), AuthService::new(repo, cfg()))
    }

    fn ann() -> RegisterInput {
        RegisterInput { name: "Ann".into(), email: "ann@example.com".into(), nickname: "ann".into(), password: "s3cret".into() }
    }

    #[tokio::test]
    async fn register_returns_verifiable_token() {
        let (_, svc) = svc();
        let session = svc.register(ann()).await.unwrap();
        assert_eq!(svc.tokens().verify(&session.token).unwrap(), session.user.user.id);
        assert!(session.user.posts.is_empty());
        assert!(session.user.comments.as_ref().is_some_and(|c| c.is_empty()));
        assert_eq!(session.user.count.unwrap().upvotes, 0);
    }

    #[tokio::test]
    async fn register_stores_bcrypt_hash() {
        let (repo, svc) = svc();
        let session = svc.register(ann()).await.unwrap();
        let cred = repo.get_credentials(session.user.user.id).await.unwrap().unwrap();
        assert_eq!(cred.password_algorithm, "bcrypt");
        assert_ne!(cred.password_hash, "s3cret");
        assert!(password::verify_password("s3cret", &cred.password_hash, PasswordAlgorithm::Bcrypt).unwrap());
    }

    #[tokio::test]
    async fn duplicate_email_rejected_without_second_record() {
        let (repo, svc) = svc();
        svc.register(ann()).await.unwrap();
        let again = RegisterInput { nickname: "other".into(), ..ann() };
        assert!(matches!(svc.register(again).await, Err(AuthError::Conflict)));
        assert_eq!(repo.user_count(), 1);
    }

    #[tokio::test]
    async fn duplicate_nickname_rejected() {
        let (repo, svc) = svc();
        svc.register(ann()).await.unwrap();
        let again = RegisterInput { email: "other@example.com".into(), ..ann() };
        assert!(matches!(svc.register(again).await, Err(AuthError::Conflict)));
        assert_eq!(repo.user_count(), 1);
    }

    #[tokio::test]
    async fn login_by_email_or_nickname() {
        let (_, svc) = svc();
        let registered = svc.register(ann()).await.unwrap();
        for login in ["ann@example.com", "ann"] {
            let session = svc.login(LoginInput { login: login.into(), password: "s3cret".into() }).await.unwrap();
            assert_eq!(session.user.user.id, registered.user.user.id);
            assert_eq!(svc.tokens().verify(&session.token).unwrap(), registered.user.user.id);
        }
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_login_are_indistinguishable() {
        let (_, svc) = svc();
        svc.register(ann()).await.unwrap();

        let wrong = svc.login(LoginInput { login: "ann".into(), password: "nope".into() }).await.unwrap_err();
        let unknown = svc.login(LoginInput { login: "ghost".into(), password: "s3cret".into() }).await.unwrap_err();
        assert!(matches!(wrong, AuthError::Unauthorized));
        assert!(matches!(unknown, AuthError::Unauthorized));
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn argon2_credentials_still_verify_after_switch() {
        let repo = Arc::new(MockAuthRepository::default());
        let argon = AuthService::new(repo.clone(), AuthConfig { password_algorithm: PasswordAlgorithm::Argon2, ..cfg() });
        argon.register(ann()).await.unwrap();

        let bcrypt = AuthService::new(repo, cfg());
        let session = bcrypt.login(LoginInput { login: "ann".into(), password: "s3cret".into() }).await.unwrap();
        assert_eq!(session.user.user.nickname, "ann");
    }

    #[tokio::test]
    async fn validate_without_token_is_missing() {
        let (_, svc) = svc();
        assert!(matches!(svc.validate(None).await, Err(AuthError::MissingToken)));
    }

    #[tokio::test]
    async fn validate_blank_token_is_missing() {
        let (_, svc) = svc();
        for blank in ["", "   "] {
            assert!(matches!(svc.validate(Some(blank)).await, Err(AuthError::MissingToken)));
        }
    }

    #[tokio::test]
    async fn validate_garbled_token() {
        let (_, svc) = svc();
        let err = svc.validate(Some("garbled")).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(TokenError::Malformed)));
        assert_eq!(err.to_string(), "jwt malformed");
    }

    #[tokio::test]
    async fn validate_reissues_a_new_token_for_same_user() {
        let (repo, svc) = svc();
        let registered = svc.register(ann()).await.unwrap();
        repo.add_post(registered.user.user.id, "hello");

        let session = svc.validate(Some(&registered.token)).await.unwrap();
        assert_ne!(session.token, registered.token);
        assert_eq!(svc.tokens().verify(&session.token).unwrap(), registered.user.user.id);
        assert_eq!(session.user.posts.len(), 1);
        assert!(session.user.comments.is_none());

        // the old token is not revoked
        assert!(svc.validate(Some(&registered.token)).await.is_ok());
    }

    #[tokio::test]
    async fn validate_expired_token() {
        let (_, svc) = svc();
        let registered = svc.register(ann()).await.unwrap();
        let stale = svc
            .tokens()
            .issue_at(registered.user.user.id, chrono::Utc::now() - Duration::hours(3))
            .unwrap();
        let err = svc.validate(Some(&stale)).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(TokenError::Expired)));
    }

    #[tokio::test]
    async fn validate_for_deleted_user_fails_closed() {
        let (repo, svc) = svc();
        let registered = svc.register(ann()).await.unwrap();
        repo.remove_user(registered.user.user.id);
        assert!(matches!(svc.validate(Some(&registered.token)).await, Err(AuthError::NotFound)));
    }

    #[tokio::test]
    async fn token_from_other_secret_rejected() {
        let (_, svc) = svc();
        let foreign = TokenService::with_default_ttl("other-secret").issue(1).unwrap();
        let err = svc.validate(Some(&foreign)).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(TokenError::InvalidSignature)));
    }
}

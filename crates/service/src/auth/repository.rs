use async_trait::async_trait;

use super::domain::{Credentials, NewUser, ProfileScope, UserProfile, UserRecord};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Users whose email equals `email` or whose nickname equals `nickname`, oldest first.
    async fn find_users_by_email_or_nickname(&self, email: &str, nickname: &str) -> Result<Vec<UserRecord>, AuthError>;

    /// Users whose email or nickname equals `login`, oldest first.
    async fn find_users_by_login(&self, login: &str) -> Result<Vec<UserRecord>, AuthError>;

    /// Insert the user and its credentials atomically.
    /// A uniqueness violation on email or nickname is `AuthError::Conflict`.
    async fn create_user(&self, user: &NewUser, password_hash: String, password_algorithm: String) -> Result<UserRecord, AuthError>;

    async fn get_credentials(&self, user_id: i32) -> Result<Option<Credentials>, AuthError>;

    async fn load_profile(&self, user_id: i32, scope: ProfileScope) -> Result<Option<UserProfile>, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use crate::posts::domain::{PostRecord, UpvoteCount};
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<Vec<UserRecord>>,
        creds: Mutex<HashMap<i32, Credentials>>, // key: user_id
        posts: Mutex<Vec<PostRecord>>,
    }

    impl MockAuthRepository {
        pub fn user_count(&self) -> usize {
            self.users.lock().unwrap().len()
        }

        /// Drop a user, as if deleted after a token was issued.
        pub fn remove_user(&self, user_id: i32) {
            self.users.lock().unwrap().retain(|u| u.id != user_id);
            self.creds.lock().unwrap().remove(&user_id);
        }

        pub fn add_post(&self, user_id: i32, title: &str) -> PostRecord {
            let mut posts = self.posts.lock().unwrap();
            let post = PostRecord {
                id: posts.len() as i32 + 1,
                user_id,
                title: title.into(),
                content: String::new(),
                image: None,
                created_at: Utc::now().into(),
            };
            posts.push(post.clone());
            post
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_users_by_email_or_nickname(&self, email: &str, nickname: &str) -> Result<Vec<UserRecord>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.iter().filter(|u| u.email == email || u.nickname == nickname).cloned().collect())
        }

        async fn find_users_by_login(&self, login: &str) -> Result<Vec<UserRecord>, AuthError> {
            self.find_users_by_email_or_nickname(login, login).await
        }

        async fn create_user(&self, user: &NewUser, password_hash: String, password_algorithm: String) -> Result<UserRecord, AuthError> {
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|u| u.email == user.email || u.nickname == user.nickname) {
                return Err(AuthError::Conflict);
            }
            let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
            let record = UserRecord {
                id,
                name: user.name.clone(),
                email: user.email.clone(),
                nickname: user.nickname.clone(),
                created_at: Utc::now().into(),
            };
            users.push(record.clone());
            self.creds.lock().unwrap().insert(id, Credentials { user_id: id, password_hash, password_algorithm });
            Ok(record)
        }

        async fn get_credentials(&self, user_id: i32) -> Result<Option<Credentials>, AuthError> {
            Ok(self.creds.lock().unwrap().get(&user_id).cloned())
        }

        async fn load_profile(&self, user_id: i32, scope: ProfileScope) -> Result<Option<UserProfile>, AuthError> {
            let user = match self.users.lock().unwrap().iter().find(|u| u.id == user_id) {
                Some(u) => u.clone(),
                None => return Ok(None),
            };
            let posts = self.posts.lock().unwrap().iter().filter(|p| p.user_id == user_id).cloned().collect();
            let (comments, count) = match scope {
                ProfileScope::Full => (Some(Vec::new()), Some(UpvoteCount::default())),
                ProfileScope::PostsOnly => (None, None),
            };
            Ok(Some(UserProfile { user, posts, comments, count }))
        }
    }
}

use serde::{Deserialize, Serialize};

pub use crate::posts::domain::{CommentRecord, PostRecord, UpvoteCount, UserRecord};

/// Registration input. Fields are stored as given; no format rules apply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub nickname: String,
    pub password: String,
}

/// Login input; `login` is matched against email or nickname.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub login: String,
    pub password: String,
}

/// User fields written at registration.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub nickname: String,
}

/// Domain credentials (hashed)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub user_id: i32,
    pub password_hash: String,
    pub password_algorithm: String,
}

/// Which relations to load alongside a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileScope {
    /// posts, comments and the upvote count
    Full,
    /// posts only
    PostsOnly,
}

/// User with the relations returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: UserRecord,
    pub posts: Vec<PostRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<CommentRecord>>,
    #[serde(rename = "_count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<UpvoteCount>,
}

impl UserProfile {
    /// Profile of a user that was just created: no posts, comments or votes yet.
    pub fn fresh(user: UserRecord) -> Self {
        Self { user, posts: Vec::new(), comments: Some(Vec::new()), count: Some(UpvoteCount::default()) }
    }
}

/// Result of register, login and validate: the user plus a freshly issued token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: UserProfile,
    pub token: String,
}

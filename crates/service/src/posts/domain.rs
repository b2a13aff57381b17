use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A post as stored, without relations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub created_at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub id: i32,
    pub user_id: i32,
    pub post_id: i32,
    pub content: String,
    pub created_at: DateTime<FixedOffset>,
}

/// Public view of a user embedded in listings; never carries credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub nickname: String,
    pub created_at: DateTime<FixedOffset>,
}

/// Denormalized relation counts, serialized under `_count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpvoteCount {
    pub upvotes: u64,
}

/// One entry of `GET /posts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostListing {
    #[serde(flatten)]
    pub post: PostRecord,
    pub user: Option<UserRecord>,
    pub comments: Vec<CommentRecord>,
    #[serde(rename = "_count")]
    pub count: UpvoteCount,
}

impl From<models::post::Model> for PostRecord {
    fn from(m: models::post::Model) -> Self {
        Self { id: m.id, user_id: m.user_id, title: m.title, content: m.content, image: m.image, created_at: m.created_at }
    }
}

impl From<models::comment::Model> for CommentRecord {
    fn from(m: models::comment::Model) -> Self {
        Self { id: m.id, user_id: m.user_id, post_id: m.post_id, content: m.content, created_at: m.created_at }
    }
}

impl From<models::user::Model> for UserRecord {
    fn from(m: models::user::Model) -> Self {
        Self { id: m.id, name: m.name, email: m.email, nickname: m.nickname, created_at: m.created_at }
    }
}

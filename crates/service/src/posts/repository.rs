use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use super::domain::{CommentRecord, PostListing, UpvoteCount, UserRecord};
use crate::errors::ServiceError;

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Every post, oldest first, with author, comments and upvote count.
    async fn list_with_relations(&self) -> Result<Vec<PostListing>, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmPostRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl PostRepository for SeaOrmPostRepository {
    async fn list_with_relations(&self) -> Result<Vec<PostListing>, ServiceError> {
        use models::{comment, post, upvote, user};

        let rows = post::Entity::find()
            .find_also_related(user::Entity)
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = rows.iter().map(|(p, _)| p.id).collect();
        let mut comments: HashMap<i32, Vec<CommentRecord>> = HashMap::new();
        for c in comment::Entity::find()
            .filter(comment::Column::PostId.is_in(ids.iter().copied()))
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await?
        {
            comments.entry(c.post_id).or_default().push(c.into());
        }
        let upvotes = upvote::count_by_posts(&self.db, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|(p, u)| {
                let id = p.id;
                PostListing {
                    post: p.into(),
                    user: u.map(UserRecord::from),
                    comments: comments.remove(&id).unwrap_or_default(),
                    count: UpvoteCount { upvotes: upvotes.get(&id).copied().unwrap_or(0) },
                }
            })
            .collect())
    }
}

/// Simple in-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use crate::posts::domain::PostRecord;
    use chrono::Utc;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Tables {
        users: Vec<UserRecord>,
        posts: Vec<PostRecord>,
        comments: Vec<CommentRecord>,
        upvotes: Vec<(i32, i32)>, // (user_id, post_id)
    }

    #[derive(Default)]
    pub struct MockPostRepository {
        tables: Mutex<Tables>,
    }

    impl MockPostRepository {
        pub fn add_user(&self, name: &str, email: &str, nickname: &str) -> UserRecord {
            let mut t = self.tables.lock().unwrap();
            let user = UserRecord {
                id: t.users.len() as i32 + 1,
                name: name.into(),
                email: email.into(),
                nickname: nickname.into(),
                created_at: Utc::now().into(),
            };
            t.users.push(user.clone());
            user
        }

        pub fn add_post(&self, user_id: i32, title: &str, content: &str) -> PostRecord {
            let mut t = self.tables.lock().unwrap();
            let post = PostRecord {
                id: t.posts.len() as i32 + 1,
                user_id,
                title: title.into(),
                content: content.into(),
                image: None,
                created_at: Utc::now().into(),
            };
            t.posts.push(post.clone());
            post
        }

        pub fn add_comment(&self, user_id: i32, post_id: i32, content: &str) -> CommentRecord {
            let mut t = self.tables.lock().unwrap();
            let comment = CommentRecord {
                id: t.comments.len() as i32 + 1,
                user_id,
                post_id,
                content: content.into(),
                created_at: Utc::now().into(),
            };
            t.comments.push(comment.clone());
            comment
        }

        pub fn upvote(&self, user_id: i32, post_id: i32) {
            self.tables.lock().unwrap().upvotes.push((user_id, post_id));
        }
    }

    #[async_trait]
    impl PostRepository for MockPostRepository {
        async fn list_with_relations(&self) -> Result<Vec<PostListing>, ServiceError> {
            let t = self.tables.lock().unwrap();
            Ok(t.posts
                .iter()
                .map(|p| PostListing {
                    post: p.clone(),
                    user: t.users.iter().find(|u| u.id == p.user_id).cloned(),
                    comments: t.comments.iter().filter(|c| c.post_id == p.id).cloned().collect(),
                    count: UpvoteCount {
                        upvotes: t.upvotes.iter().filter(|(_, post_id)| *post_id == p.id).count() as u64,
                    },
                })
                .collect())
        }
    }
}

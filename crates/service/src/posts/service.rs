use std::sync::Arc;

use tracing::{debug, instrument};

use super::domain::PostListing;
use super::repository::PostRepository;
use crate::errors::ServiceError;

/// Read-only access to posts.
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self { Self { repo } }

    /// All posts with embedded author, comments and upvote count.
    ///
    /// # Examples
    /// ```
    /// use service::posts::{PostService, repository::mock::MockPostRepository};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockPostRepository::default());
    /// let author = repo.add_user("Ann", "ann@example.com", "ann");
    /// let post = repo.add_post(author.id, "Hello", "first post");
    /// repo.upvote(author.id, post.id);
    /// let svc = PostService::new(repo);
    /// let posts = tokio_test::block_on(svc.list()).unwrap();
    /// assert_eq!(posts.len(), 1);
    /// assert_eq!(posts[0].count.upvotes, 1);
    /// ```
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<PostListing>, ServiceError> {
        let posts = self.repo.list_with_relations().await?;
        debug!(count = posts.len(), "posts_listed");
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posts::repository::{mock::MockPostRepository, SeaOrmPostRepository};
    use crate::test_support::{get_db, unique};

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let svc = PostService::new(Arc::new(MockPostRepository::default()));
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn counts_match_upvote_records() {
        let repo = Arc::new(MockPostRepository::default());
        let ann = repo.add_user("Ann", "ann@example.com", "ann");
        let bob = repo.add_user("Bob", "bob@example.com", "bob");
        let p1 = repo.add_post(ann.id, "One", "first");
        let p2 = repo.add_post(bob.id, "Two", "second");
        let p3 = repo.add_post(ann.id, "Three", "third");
        repo.upvote(ann.id, p1.id);
        repo.upvote(bob.id, p1.id);
        repo.upvote(ann.id, p2.id);
        repo.add_comment(bob.id, p1.id, "nice");

        let svc = PostService::new(repo);
        let posts = svc.list().await.unwrap();
        assert_eq!(posts.len(), 3);

        let by_id = |id: i32| posts.iter().find(|p| p.post.id == id).unwrap();
        assert_eq!(by_id(p1.id).count.upvotes, 2);
        assert_eq!(by_id(p2.id).count.upvotes, 1);
        assert_eq!(by_id(p3.id).count.upvotes, 0);
        assert_eq!(by_id(p1.id).comments.len(), 1);
        assert_eq!(by_id(p2.id).user.as_ref().unwrap().nickname, "bob");
    }

    #[tokio::test]
    async fn listing_serializes_count_and_flattened_post() {
        let repo = Arc::new(MockPostRepository::default());
        let ann = repo.add_user("Ann", "ann@example.com", "ann");
        repo.add_post(ann.id, "One", "first");
        let posts = PostService::new(repo).list().await.unwrap();

        let json = serde_json::to_value(&posts).unwrap();
        assert_eq!(json[0]["title"], "One");
        assert_eq!(json[0]["user"]["email"], "ann@example.com");
        assert_eq!(json[0]["_count"]["upvotes"], 0);
        assert!(json[0]["comments"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn seaorm_listing_matches_store() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };
        use models::{post, upvote, user};

        let author = user::create(&db, "Lister", &format!("{}@example.com", unique("list")), &unique("list")).await?;
        let voter = user::create(&db, "Voter", &format!("{}@example.com", unique("vote")), &unique("vote")).await?;
        let p = post::create(&db, author.id, "Listed", "body", None).await?;
        upvote::create(&db, voter.id, p.id).await?;
        upvote::create(&db, author.id, p.id).await?;

        let svc = PostService::new(Arc::new(SeaOrmPostRepository { db: db.clone() }));
        let posts = svc.list().await?;
        let mine = posts.iter().find(|l| l.post.id == p.id).expect("post listed");
        assert_eq!(mine.count.upvotes, 2);
        assert_eq!(mine.user.as_ref().map(|u| u.id), Some(author.id));

        user::hard_delete(&db, voter.id).await?;
        user::hard_delete(&db, author.id).await?;
        Ok(())
    }
}

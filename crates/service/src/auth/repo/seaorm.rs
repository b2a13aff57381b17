use sea_orm::{DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, TransactionTrait};

use crate::auth::domain::{Credentials, NewUser, ProfileScope, UserProfile, UserRecord};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;
use crate::posts::domain::{CommentRecord, UpvoteCount};

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

fn db_err(e: sea_orm::DbErr) -> AuthError {
    AuthError::from(models::errors::ModelError::from(e))
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_users_by_email_or_nickname(&self, email: &str, nickname: &str) -> Result<Vec<UserRecord>, AuthError> {
        let found = models::user::find_by_email_or_nickname(&self.db, email, nickname).await?;
        Ok(found.into_iter().map(UserRecord::from).collect())
    }

    async fn find_users_by_login(&self, login: &str) -> Result<Vec<UserRecord>, AuthError> {
        let found = models::user::find_by_login(&self.db, login).await?;
        Ok(found.into_iter().map(UserRecord::from).collect())
    }

    async fn create_user(&self, user: &NewUser, password_hash: String, password_algorithm: String) -> Result<UserRecord, AuthError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let created = models::user::create(&txn, &user.name, &user.email, &user.nickname).await?;
        models::user_credentials::upsert_password(&txn, created.id, password_hash, &password_algorithm).await?;
        txn.commit().await.map_err(db_err)?;
        Ok(created.into())
    }

    async fn get_credentials(&self, user_id: i32) -> Result<Option<Credentials>, AuthError> {
        let res = models::user_credentials::find_by_user(&self.db, user_id).await?;
        Ok(res.map(|c| Credentials { user_id: c.user_id, password_hash: c.password_hash, password_algorithm: c.password_algorithm }))
    }

    async fn load_profile(&self, user_id: i32, scope: ProfileScope) -> Result<Option<UserProfile>, AuthError> {
        use models::{comment, post, upvote, user};

        let Some(found) = user::Entity::find_by_id(user_id).one(&self.db).await.map_err(db_err)? else {
            return Ok(None);
        };
        let posts = found
            .find_related(post::Entity)
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let (comments, count): (Option<Vec<CommentRecord>>, Option<UpvoteCount>) = match scope {
            ProfileScope::Full => {
                let comments = found
                    .find_related(comment::Entity)
                    .order_by_asc(comment::Column::Id)
                    .all(&self.db)
                    .await
                    .map_err(db_err)?;
                let upvotes = upvote::count_by_user(&self.db, found.id).await?;
                (Some(comments.into_iter().map(Into::into).collect()), Some(UpvoteCount { upvotes }))
            }
            ProfileScope::PostsOnly => (None, None),
        };

        Ok(Some(UserProfile {
            user: found.into(),
            posts: posts.into_iter().map(Into::into).collect(),
            comments,
            count,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, unique};

    #[tokio::test]
    async fn create_and_load_profile() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let repo = SeaOrmAuthRepository { db: db.clone() };

        let new_user = NewUser {
            name: "Repo".into(),
            email: format!("{}@example.com", unique("repo")),
            nickname: unique("repo"),
        };
        let created = repo.create_user(&new_user, "$2b$04$hash".into(), "bcrypt".into()).await?;
        let creds = repo.get_credentials(created.id).await?.expect("credentials stored");
        assert_eq!(creds.password_algorithm, "bcrypt");

        let dup = repo.create_user(&new_user, "$2b$04$hash".into(), "bcrypt".into()).await;
        assert!(matches!(dup, Err(AuthError::Conflict)));

        models::post::create(&db, created.id, "Mine", "body", None).await?;
        let full = repo.load_profile(created.id, ProfileScope::Full).await?.expect("profile");
        assert_eq!(full.posts.len(), 1);
        assert_eq!(full.count, Some(UpvoteCount { upvotes: 0 }));
        let slim = repo.load_profile(created.id, ProfileScope::PostsOnly).await?.expect("profile");
        assert!(slim.comments.is_none());

        let by_nick = repo.find_users_by_login(&new_user.nickname).await?;
        assert_eq!(by_nick[0].id, created.id);

        models::user::hard_delete(&db, created.id).await?;
        assert!(repo.load_profile(created.id, ProfileScope::Full).await?.is_none());
        Ok(())
    }
}

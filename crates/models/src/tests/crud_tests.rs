use anyhow::Result;
use sea_orm::{EntityTrait, ModelTrait};

use super::{test_db, unique};
use crate::errors::ModelError;
use crate::{comment, post, upvote, user, user_credentials};

#[tokio::test]
async fn test_user_create_and_lookup() -> Result<()> {
    let Some(db) = test_db().await? else { return Ok(()) };

    let nick = unique("nick");
    let email = format!("{}@example.com", unique("crud"));
    let created = user::create(&db, "Crud User", &email, &nick).await?;
    assert_eq!(created.email, email);

    let by_email = user::find_by_login(&db, &email).await?;
    assert_eq!(by_email.len(), 1);
    assert_eq!(by_email[0].id, created.id);

    let by_nick = user::find_by_login(&db, &nick).await?;
    assert_eq!(by_nick[0].id, created.id);

    let either = user::find_by_email_or_nickname(&db, "nobody@example.com", &nick).await?;
    assert_eq!(either.len(), 1);

    user::hard_delete(&db, created.id).await?;
    assert!(user::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() -> Result<()> {
    let Some(db) = test_db().await? else { return Ok(()) };

    let email = format!("{}@example.com", unique("dup"));
    let first = user::create(&db, "First", &email, &unique("a")).await?;
    let second = user::create(&db, "Second", &email, &unique("b")).await;
    assert!(matches!(second, Err(ModelError::Conflict(_))));

    user::hard_delete(&db, first.id).await?;
    Ok(())
}

#[tokio::test]
async fn test_credentials_upsert() -> Result<()> {
    let Some(db) = test_db().await? else { return Ok(()) };

    let u = user::create(&db, "Cred", &format!("{}@example.com", unique("cred")), &unique("cred")).await?;
    let c1 = user_credentials::upsert_password(&db, u.id, "hash-1".into(), "bcrypt").await?;
    let c2 = user_credentials::upsert_password(&db, u.id, "hash-2".into(), "argon2").await?;
    assert_eq!(c1.id, c2.id);
    assert_eq!(c2.password_algorithm, "argon2");

    let empty = user_credentials::upsert_password(&db, u.id, "  ".into(), "bcrypt").await;
    assert!(matches!(empty, Err(ModelError::Validation(_))));

    // credentials are removed with the user
    user::hard_delete(&db, u.id).await?;
    assert!(user_credentials::find_by_user(&db, u.id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_post_relations_and_upvote_counts() -> Result<()> {
    let Some(db) = test_db().await? else { return Ok(()) };

    let author = user::create(&db, "Author", &format!("{}@example.com", unique("author")), &unique("author")).await?;
    let fan = user::create(&db, "Fan", &format!("{}@example.com", unique("fan")), &unique("fan")).await?;

    let p1 = post::create(&db, author.id, "First", "hello", None).await?;
    let p2 = post::create(&db, author.id, "Second", "world", Some("https://img.example.com/2.png")).await?;
    comment::create(&db, fan.id, p1.id, "nice").await?;
    upvote::create(&db, fan.id, p1.id).await?;
    upvote::create(&db, author.id, p1.id).await?;

    let counts = upvote::count_by_posts(&db, &[p1.id, p2.id]).await?;
    assert_eq!(counts.get(&p1.id), Some(&2));
    assert_eq!(counts.get(&p2.id), None);
    assert_eq!(upvote::count_by_user(&db, fan.id).await?, 1);

    let comments = p1.find_related(comment::Entity).all(&db).await?;
    assert_eq!(comments.len(), 1);
    let posts = author.find_related(post::Entity).all(&db).await?;
    assert_eq!(posts.len(), 2);

    // one vote per (user, post)
    let again = upvote::create(&db, fan.id, p1.id).await;
    assert!(matches!(again, Err(ModelError::Conflict(_))));

    user::hard_delete(&db, fan.id).await?;
    user::hard_delete(&db, author.id).await?;
    Ok(())
}

#[tokio::test]
async fn test_count_by_posts_empty_input() -> Result<()> {
    let Some(db) = test_db().await? else { return Ok(()) };
    assert!(upvote::count_by_posts(&db, &[]).await?.is_empty());
    Ok(())
}

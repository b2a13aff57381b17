use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Post: index on author
        manager
            .create_index(
                Index::create()
                    .name("idx_post_user")
                    .table(Post::Table)
                    .col(Post::UserId)
                    .to_owned(),
            )
            .await?;

        // Comment: index on post for listing joins
        manager
            .create_index(
                Index::create()
                    .name("idx_comment_post")
                    .table(Comment::Table)
                    .col(Comment::PostId)
                    .to_owned(),
            )
            .await?;

        // Upvote: one vote per (user, post)
        manager
            .create_index(
                Index::create()
                    .name("uniq_upvote_user_post")
                    .table(Upvote::Table)
                    .col(Upvote::UserId)
                    .col(Upvote::PostId)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_upvote_post")
                    .table(Upvote::Table)
                    .col(Upvote::PostId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_post_user").table(Post::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_comment_post").table(Comment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_upvote_user_post").table(Upvote::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_upvote_post").table(Upvote::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Post { Table, UserId }

#[derive(DeriveIden)]
enum Comment { Table, PostId }

#[derive(DeriveIden)]
enum Upvote { Table, UserId, PostId }

//! Create `upvote` table. Listings only expose the per-post count.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Upvote::Table)
                    .if_not_exists()
                    .col(pk_auto(Upvote::Id))
                    .col(integer(Upvote::UserId).not_null())
                    .col(integer(Upvote::PostId).not_null())
                    .col(
                        timestamp_with_time_zone(Upvote::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_upvote_user")
                            .from(Upvote::Table, Upvote::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_upvote_post")
                            .from(Upvote::Table, Upvote::PostId)
                            .to(Post::Table, Post::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Upvote::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Upvote { Table, Id, UserId, PostId, CreatedAt }

#[derive(DeriveIden)]
enum User { Table, Id }

#[derive(DeriveIden)]
enum Post { Table, Id }

use sea_orm::{entity::prelude::*, Condition, QueryOrder, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{comment, post, upvote, user_credentials};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub nickname: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Credentials,
    Posts,
    Comments,
    Upvotes,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Credentials => Entity::has_one(user_credentials::Entity).into(),
            Relation::Posts => Entity::has_many(post::Entity).into(),
            Relation::Comments => Entity::has_many(comment::Entity).into(),
            Relation::Upvotes => Entity::has_many(upvote::Entity).into(),
        }
    }
}

impl Related<user_credentials::Entity> for Entity {
    fn to() -> RelationDef { Relation::Credentials.def() }
}

impl Related<post::Entity> for Entity {
    fn to() -> RelationDef { Relation::Posts.def() }
}

impl Related<comment::Entity> for Entity {
    fn to() -> RelationDef { Relation::Comments.def() }
}

impl Related<upvote::Entity> for Entity {
    fn to() -> RelationDef { Relation::Upvotes.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert a user. No format checks: any strings are stored as given.
pub async fn create<C: ConnectionTrait>(db: &C, name: &str, email: &str, nickname: &str) -> Result<Model, ModelError> {
    let am = ActiveModel {
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        nickname: Set(nickname.to_string()),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

/// Users whose email equals `email` or whose nickname equals `nickname`, oldest first.
pub async fn find_by_email_or_nickname<C: ConnectionTrait>(db: &C, email: &str, nickname: &str) -> Result<Vec<Model>, ModelError> {
    let found = Entity::find()
        .filter(
            Condition::any()
                .add(Column::Email.eq(email))
                .add(Column::Nickname.eq(nickname)),
        )
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    Ok(found)
}

/// Users matching a login handle (email or nickname), oldest first.
pub async fn find_by_login<C: ConnectionTrait>(db: &C, login: &str) -> Result<Vec<Model>, ModelError> {
    find_by_email_or_nickname(db, login, login).await
}

pub async fn hard_delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), ModelError> {
    Entity::delete_by_id(id).exec(db).await?;
    Ok(())
}

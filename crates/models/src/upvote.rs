use std::collections::HashMap;

use sea_orm::entity::prelude::*;
use sea_orm::{sea_query::Expr, FromQueryResult, QuerySelect, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{post, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "upvote")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub post_id: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Post,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
            Relation::Post => Entity::belongs_to(post::Entity)
                .from(Column::PostId)
                .to(post::Column::Id)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl Related<post::Entity> for Entity {
    fn to() -> RelationDef { Relation::Post.def() }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, FromQueryResult)]
struct PostTally {
    post_id: i32,
    upvotes: i64,
}

pub async fn create<C: ConnectionTrait>(db: &C, user_id: i32, post_id: i32) -> Result<Model, ModelError> {
    let am = ActiveModel {
        user_id: Set(user_id),
        post_id: Set(post_id),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

/// Upvote count per post id. Posts without votes are absent from the map.
pub async fn count_by_posts<C: ConnectionTrait>(db: &C, post_ids: &[i32]) -> Result<HashMap<i32, u64>, ModelError> {
    if post_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = Entity::find()
        .select_only()
        .column(Column::PostId)
        .column_as(Expr::col(Column::Id).count(), "upvotes")
        .filter(Column::PostId.is_in(post_ids.iter().copied()))
        .group_by(Column::PostId)
        .into_model::<PostTally>()
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .map(|r| (r.post_id, u64::try_from(r.upvotes).unwrap_or(0)))
        .collect())
}

/// Number of upvotes cast by a user.
pub async fn count_by_user<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<u64, ModelError> {
    let n = Entity::find()
        .filter(Column::UserId.eq(user_id))
        .count(db)
        .await?;
    Ok(n)
}

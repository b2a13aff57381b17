use axum::{extract::State, Json};

use service::posts::domain::PostListing;

use crate::errors::ApiError;
use crate::state::ServerState;

#[utoipa::path(get, path = "/posts", tag = "posts", responses((status = 200, description = "Every post with author, comments and upvote count", body = [crate::openapi::PostResponse])))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<PostListing>>, ApiError> {
    Ok(Json(state.posts.list().await?))
}

use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct RegisterRequest { pub name: String, pub email: String, pub nickname: String, pub password: String }

#[derive(ToSchema)]
pub struct LoginRequest {
    /// email or nickname
    pub login: String,
    pub password: String,
}

#[derive(ToSchema)]
pub struct MessageResponse { pub message: String }

#[derive(ToSchema)]
pub struct ErrorResponse { pub error: String }

#[derive(ToSchema)]
pub struct UpvoteCountDoc { pub upvotes: u64 }

#[derive(ToSchema)]
pub struct CommentDoc {
    pub id: i32,
    pub user_id: i32,
    pub post_id: i32,
    pub content: String,
    pub created_at: String,
}

#[derive(ToSchema)]
pub struct UserDoc {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub nickname: String,
    pub created_at: String,
}

#[derive(ToSchema)]
pub struct PostDoc {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub created_at: String,
}

#[derive(ToSchema)]
pub struct PostResponse {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub created_at: String,
    pub user: Option<UserDoc>,
    pub comments: Vec<CommentDoc>,
    pub _count: UpvoteCountDoc,
}

#[derive(ToSchema)]
pub struct ProfileDoc {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub nickname: String,
    pub created_at: String,
    pub posts: Vec<PostDoc>,
    /// omitted by /validate
    pub comments: Option<Vec<CommentDoc>>,
    /// omitted by /validate
    pub _count: Option<UpvoteCountDoc>,
}

#[derive(ToSchema)]
pub struct SessionResponse { pub user: ProfileDoc, pub token: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::posts::list,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::validate,
        crate::routes::esports::news,
        crate::routes::esports::matches,
        crate::routes::esports::match_by_id,
        crate::routes::esports::results,
        crate::routes::esports::top_players,
        crate::routes::esports::player,
        crate::routes::esports::teams,
        crate::routes::esports::team,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            MessageResponse,
            ErrorResponse,
            UpvoteCountDoc,
            CommentDoc,
            UserDoc,
            PostDoc,
            PostResponse,
            ProfileDoc,
            SessionResponse,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "posts"),
        (name = "esports", description = "Served by the esports backend only")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_routes() {
        let doc = ApiDoc::openapi();
        for path in ["/health", "/posts", "/register", "/login", "/validate", "/players", "/teams/{id}"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}

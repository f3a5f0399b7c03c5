//! Post handlers
//!
//! Post creation, single-post lookup and the two feeds. Feeds always answer
//! 200; a storage failure shows up as `degraded: true` in the body.

use axum::{extract::State, Json};
use typesense_core::{FeedScope, Post};
use typesense_service::dto::{CreatePostRequest, FeedResponse, PostDetailResponse};
use typesense_service::{FeedService, PostService};

use crate::extractors::{ApiPath, AuthUser, OptionalAuthUser, PostIdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Create a post
///
/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<Post>>> {
    let service = PostService::new(state.service_context());
    let author = auth.0.map(|user| user.user_id);
    let post = service.create(author, request).await?;
    Ok(Created(Json(post)))
}

/// Every post, newest first
///
/// GET /posts
pub async fn list_posts(State(state): State<AppState>) -> Json<FeedResponse> {
    let service = FeedService::new(state.service_context());
    Json(service.list(FeedScope::All).await)
}

/// The caller's own posts, newest first
///
/// GET /posts/my
pub async fn list_my_posts(State(state): State<AppState>, auth: AuthUser) -> Json<FeedResponse> {
    let service = FeedService::new(state.service_context());
    Json(service.list(FeedScope::Mine(Some(auth.user_id))).await)
}

/// GET /posts/{post_id}
pub async fn get_post(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<PostIdPath>,
) -> ApiResult<Json<PostDetailResponse>> {
    let service = PostService::new(state.service_context());
    Ok(Json(service.get(&path.post_id).await?))
}

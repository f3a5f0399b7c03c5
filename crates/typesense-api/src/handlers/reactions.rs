//! Reaction handlers
//!
//! Clients poll the list endpoint; toggling requires a signed-in user.

use axum::{extract::State, Json};
use typesense_core::emoji_catalog;
use typesense_service::dto::{EmojiCatalogResponse, ReactionsResponse, ToggleReactionResponse};
use typesense_service::ReactionService;

use crate::extractors::{ApiPath, AuthUser, OptionalAuthUser, PostIdPath, ReactionPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// Reactions on a post, with `me` set for the caller's own
///
/// GET /posts/{post_id}/reactions
pub async fn list_reactions(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    ApiPath(path): ApiPath<PostIdPath>,
) -> ApiResult<Json<ReactionsResponse>> {
    let service = ReactionService::new(state.service_context());
    Ok(Json(service.list(&path.post_id, auth.user_id()).await?))
}

/// Add the caller's reaction, or remove it if already present
///
/// POST /posts/{post_id}/reactions/{emoji}
pub async fn toggle_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<ReactionPath>,
) -> ApiResult<Json<ToggleReactionResponse>> {
    let service = ReactionService::new(state.service_context());
    let response = service
        .toggle(&path.post_id, &auth.user_id, &path.emoji)
        .await?;
    Ok(Json(response))
}

/// GET /reactions/emojis
pub async fn list_emojis() -> Json<EmojiCatalogResponse> {
    Json(EmojiCatalogResponse {
        categories: emoji_catalog(),
    })
}

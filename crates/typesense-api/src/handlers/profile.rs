//! Profile handlers

use axum::{extract::State, Json};
use typesense_service::dto::{UpdateProfileRequest, UserResponse};
use typesense_service::ProfileService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let service = ProfileService::new(state.service_context());
    Ok(Json(service.get(&auth.user_id).await?))
}

/// Create or rename the caller's profile
///
/// POST /profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = ProfileService::new(state.service_context());
    Ok(Json(service.upsert(&auth.user_id, request).await?))
}

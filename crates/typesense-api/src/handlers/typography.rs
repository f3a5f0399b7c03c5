//! Typography preview handler

use axum::{extract::State, Json};
use typesense_service::dto::{PreviewRequest, PreviewResponse};
use typesense_service::TypographyService;

use crate::extractors::ValidatedJson;
use crate::response::ApiResult;
use crate::state::AppState;

/// Derive leading and tracking for draft emotions
///
/// POST /typography/preview
pub async fn preview(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<PreviewRequest>,
) -> ApiResult<Json<PreviewResponse>> {
    let service = TypographyService::new(state.service_context());
    Ok(Json(service.preview(request).await?))
}

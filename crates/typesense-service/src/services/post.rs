//! Post service
//!
//! Creates posts with server-derived typography and loads single posts.

use serde_json::Value;
use tracing::{info, instrument, warn};
use typesense_core::keys::post_key;
use typesense_core::{
    compute, DomainError, EmotionState, Post, PostId, TypographyResult, UserId, ANONYMOUS_NAME,
};

use crate::dto::{CreatePostRequest, PostDetailResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::profile::ProfileService;

pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a post
    ///
    /// `author` is the authenticated caller; without one the request must
    /// carry `user_id`.
    #[instrument(skip(self, request), fields(author = ?author))]
    pub async fn create(
        &self,
        author: Option<UserId>,
        request: CreatePostRequest,
    ) -> ServiceResult<Post> {
        let user_id = match (author, request.user_id.as_deref()) {
            (Some(user_id), _) => user_id,
            (None, Some(raw)) => UserId::new(raw)?,
            (None, None) => return Err(ServiceError::validation("user_id is required")),
        };

        let text = Post::validate_text(&request.text)?;
        let emotions = EmotionState::with_defaults(request.joy, request.surprise, request.anger)?;
        let typography = compute(&emotions);
        check_supplied_spacing(&typography, request.leading, request.tracking)?;

        let name = self.resolve_name(&user_id, request.name.as_deref()).await?;

        let (post_id, created_at) = self.ctx.post_id_generator().generate(&user_id);
        let post = Post::new(
            post_id,
            user_id,
            &text,
            name,
            emotions,
            &typography,
            created_at,
        )?;

        let key = post_key(&post.id);
        let written = self
            .ctx
            .store()
            .compare_and_swap(&key, None, Some(serde_json::to_value(&post)?))
            .await?;
        if !written {
            warn!(post_id = %post.id, "Post key already taken");
            return Err(DomainError::WriteConflict(key).into());
        }

        info!(
            post_id = %post.id,
            user_id = %post.user_id,
            leading = post.leading,
            tracking = post.tracking,
            "Post created"
        );

        Ok(post)
    }

    /// Load one post with its explanation
    #[instrument(skip(self))]
    pub async fn get(&self, post_id: &str) -> ServiceResult<PostDetailResponse> {
        let post = self.find(post_id).await?;
        let explanation = compute(&post.emotions()?).explanation;
        Ok(PostDetailResponse { post, explanation })
    }

    /// Load a post or fail with `PostNotFound`
    pub async fn find(&self, post_id: &str) -> ServiceResult<Post> {
        let id = PostId::parse(post_id)
            .map_err(|_| DomainError::PostNotFound(post_id.to_string()))?;
        let key = post_key(&id);

        let value = self
            .ctx
            .store()
            .get(&key)
            .await?
            .ok_or_else(|| DomainError::PostNotFound(post_id.to_string()))?;

        decode_post(key, value)
    }

    async fn resolve_name(&self, user_id: &UserId, supplied: Option<&str>) -> ServiceResult<String> {
        if let Some(name) = supplied.map(str::trim).filter(|name| !name.is_empty()) {
            return Ok(name.to_string());
        }
        let stored = ProfileService::new(self.ctx).display_name(user_id).await?;
        Ok(stored.unwrap_or_else(|| ANONYMOUS_NAME.to_string()))
    }
}

fn decode_post(key: String, value: Value) -> ServiceResult<Post> {
    serde_json::from_value(value).map_err(|e| {
        DomainError::CorruptRecord {
            key,
            reason: e.to_string(),
        }
        .into()
    })
}

/// Client-side spacing is advisory; it must agree with the derived values
fn check_supplied_spacing(
    typography: &TypographyResult,
    leading: Option<f64>,
    tracking: Option<f64>,
) -> Result<(), DomainError> {
    let leading_ok = leading.map_or(true, |l| typography.matches(l, typography.tracking));
    let tracking_ok = tracking.map_or(true, |t| typography.matches(typography.leading, t));
    if leading_ok && tracking_ok {
        return Ok(());
    }
    Err(DomainError::TypographyMismatch(format!(
        "expected leading {} and tracking {}",
        typography.leading, typography.tracking
    )))
}

//! Reaction service
//!
//! Loads and toggles the reaction set stored under `reactions:<post_id>`.
//! Toggles for one post are serialized in-process by a per-key lock, and
//! every write is a conditional swap against the value that was read, so
//! writers in other processes cannot be lost either.

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument, warn};
use typesense_core::keys::reactions_key;
use typesense_core::{DomainError, Emoji, PostId, ReactionSet, ToggleOutcome, UserId};

use crate::dto::{reaction_summaries, ReactionsResponse, ToggleReactionResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::post::PostService;

pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Current reactions on a post, flagged for `viewer`
    ///
    /// A post nobody reacted to (or that does not exist) has no reactions.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        post_id: &str,
        viewer: Option<&UserId>,
    ) -> ServiceResult<ReactionsResponse> {
        let id = PostId::parse(post_id)
            .map_err(|_| DomainError::PostNotFound(post_id.to_string()))?;
        let (set, _) = self.load(&reactions_key(&id)).await?;

        Ok(ReactionsResponse {
            post_id: id.to_string(),
            reactions: reaction_summaries(&set, viewer),
            total: set.total(),
        })
    }

    /// Add or remove `user`'s `emoji` reaction on a post
    #[instrument(skip(self), fields(user_id = %user))]
    pub async fn toggle(
        &self,
        post_id: &str,
        user: &UserId,
        emoji: &str,
    ) -> ServiceResult<ToggleReactionResponse> {
        let emoji = Emoji::new(emoji)?;
        let post = PostService::new(self.ctx).find(post_id).await?;
        let key = reactions_key(&post.id);

        let _lock = self.ctx.lock_key(&key).await;
        let max_retries = self.ctx.settings().reaction_max_retries.max(1);

        for attempt in 1..=max_retries {
            let (mut set, current) = self.load(&key).await?;
            let outcome = set.toggle_in_place(&emoji, user);

            let next = if set.is_empty() {
                None
            } else {
                Some(serde_json::to_value(&set)?)
            };

            if self
                .ctx
                .store()
                .compare_and_swap(&key, current.as_ref(), next)
                .await?
            {
                info!(
                    post_id = %post.id,
                    emoji = %emoji,
                    outcome = ?outcome,
                    "Reaction toggled"
                );
                return Ok(ToggleReactionResponse {
                    post_id: post.id.to_string(),
                    emoji: emoji.to_string(),
                    reacted: outcome == ToggleOutcome::Added,
                    reactions: reaction_summaries(&set, Some(user)),
                });
            }

            warn!(key = %key, attempt, "Reaction write lost a race, retrying");
        }

        Err(DomainError::WriteConflict(key).into())
    }

    /// Decoded set plus the raw value it came from, for the conditional write
    async fn load(&self, key: &str) -> ServiceResult<(ReactionSet, Option<Value>)> {
        let Some(raw) = self.ctx.store().get(key).await? else {
            return Ok((ReactionSet::new(), None));
        };
        let set = ReactionSet::deserialize(&raw).map_err(|e| DomainError::CorruptRecord {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        Ok((set, Some(raw)))
    }
}

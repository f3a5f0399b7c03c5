//! Profile service
//!
//! Display names shown next to posts.

use tracing::{info, instrument};
use typesense_core::{DomainError, User, UserId};

use crate::dto::{UpdateProfileRequest, UserResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::users::{StoredUser, UserRecords};

pub struct ProfileService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProfileService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get the caller's profile
    #[instrument(skip(self))]
    pub async fn get(&self, user_id: &UserId) -> ServiceResult<UserResponse> {
        let stored = UserRecords::new(self.ctx.store())
            .find(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id.to_string()))?;
        Ok(UserResponse::from(&stored.user))
    }

    /// Set the caller's display name, creating the profile if needed
    #[instrument(skip(self, request))]
    pub async fn upsert(
        &self,
        user_id: &UserId,
        request: UpdateProfileRequest,
    ) -> ServiceResult<UserResponse> {
        let records = UserRecords::new(self.ctx.store());

        let stored = match records.find(user_id).await? {
            Some(mut stored) => {
                stored.user.rename(&request.name)?;
                stored
            }
            None => {
                let name = User::validate_name(&request.name)?;
                StoredUser {
                    user: User::new(user_id.clone(), String::new(), name),
                    password_hash: None,
                }
            }
        };

        records.save(&stored).await?;
        info!(user_id = %user_id, "Profile updated");

        Ok(UserResponse::from(&stored.user))
    }

    /// Stored display name, if the user has a profile
    pub async fn display_name(&self, user_id: &UserId) -> ServiceResult<Option<String>> {
        Ok(UserRecords::new(self.ctx.store())
            .find(user_id)
            .await?
            .map(|stored| stored.user.name))
    }
}

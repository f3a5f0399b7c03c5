//! User records in the key-value store
//!
//! `user:<id>` holds the account with its password hash and
//! `user_email:<email>` maps a lowercased email to the id.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use typesense_core::keys::{user_email_key, user_key};
use typesense_core::traits::KvStore;
use typesense_core::{DomainError, User, UserId};

use super::error::ServiceResult;

/// Account as persisted, including credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StoredUser {
    #[serde(flatten)]
    pub user: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
}

/// Typed access to user records over the raw store
pub(crate) struct UserRecords<'a> {
    store: &'a dyn KvStore,
}

impl<'a> UserRecords<'a> {
    pub fn new(store: &'a dyn KvStore) -> Self {
        Self { store }
    }

    pub async fn find(&self, id: &UserId) -> ServiceResult<Option<StoredUser>> {
        let key = user_key(id);
        let Some(value) = self.store.get(&key).await? else {
            return Ok(None);
        };
        let stored = serde_json::from_value(value).map_err(|e| DomainError::CorruptRecord {
            key,
            reason: e.to_string(),
        })?;
        Ok(Some(stored))
    }

    pub async fn find_by_email(&self, email: &str) -> ServiceResult<Option<StoredUser>> {
        let Some(Value::String(id)) = self.store.get(&user_email_key(email)).await? else {
            return Ok(None);
        };
        let id = UserId::new(id)?;
        let found = self.find(&id).await?;
        if found.is_none() {
            warn!(user_id = %id, "Email index points at a missing user");
        }
        Ok(found)
    }

    pub async fn save(&self, stored: &StoredUser) -> ServiceResult<()> {
        let value = serde_json::to_value(stored)?;
        self.store.set(&user_key(&stored.user.id), value).await?;
        Ok(())
    }

    /// Claim an email for `id`; false if another account already holds it
    pub async fn reserve_email(&self, email: &str, id: &UserId) -> ServiceResult<bool> {
        Ok(self
            .store
            .compare_and_swap(
                &user_email_key(email),
                None,
                Some(Value::String(id.to_string())),
            )
            .await?)
    }

    pub async fn release_email(&self, email: &str) -> ServiceResult<()> {
        self.store.delete(&user_email_key(email)).await?;
        Ok(())
    }
}

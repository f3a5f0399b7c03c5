//! User entity - an account and its public profile

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::UserId;

/// Longest accepted display name, in characters
pub const MAX_DISPLAY_NAME_CHARS: usize = 50;

/// User account as stored under `user:<id>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Empty for profiles created before sign-up
    #[serde(default)]
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(id: UserId, email: String, name: String) -> Self {
        Self {
            id,
            email,
            name,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Trim and check a display name
    pub fn validate_name(name: &str) -> Result<String, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidDisplayName(
                "name must not be empty".to_string(),
            ));
        }
        if name.chars().count() > MAX_DISPLAY_NAME_CHARS {
            return Err(DomainError::InvalidDisplayName(format!(
                "name must be at most {MAX_DISPLAY_NAME_CHARS} characters"
            )));
        }
        Ok(name.to_string())
    }

    /// Replace the display name
    pub fn rename(&mut self, name: &str) -> Result<(), DomainError> {
        self.name = Self::validate_name(name)?;
        self.updated_at = Some(Utc::now());
        Ok(())
    }
}

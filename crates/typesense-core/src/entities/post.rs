//! Post entity - a short text stored with its emotions and typography

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::typography::TypographyResult;
use crate::value_objects::{EmotionState, PostId, UserId};

/// Maximum post length, in characters
pub const MAX_TEXT_CHARS: usize = 120;

/// Display name stored when neither the request nor the profile has one
pub const ANONYMOUS_NAME: &str = "名無し";

/// Leading assumed for stored records that lack one
pub const DEFAULT_LEADING: f64 = 1.5;

/// A stored post
///
/// Deserialization is lenient: records written by older clients may miss the
/// display name, spacing, or emotion fields, and those fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub user_id: UserId,
    pub text: String,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_leading")]
    pub leading: f64,
    #[serde(default)]
    pub tracking: f64,
    #[serde(default = "default_level")]
    pub joy: u8,
    #[serde(default = "default_level")]
    pub surprise: u8,
    #[serde(default = "default_level")]
    pub anger: u8,
    /// RFC 3339 timestamp; kept as text since legacy records may hold anything
    #[serde(default)]
    pub created_at: String,
}

fn default_name() -> String {
    ANONYMOUS_NAME.to_string()
}

fn default_leading() -> f64 {
    DEFAULT_LEADING
}

fn default_level() -> u8 {
    EmotionState::DEFAULT_LEVEL
}

impl Post {
    /// Create a new post from already validated parts
    pub fn new(
        id: PostId,
        user_id: UserId,
        text: &str,
        name: String,
        emotions: EmotionState,
        typography: &TypographyResult,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let text = Self::validate_text(text)?;
        Ok(Self {
            id,
            user_id,
            text,
            name,
            leading: typography.leading,
            tracking: typography.tracking,
            joy: emotions.joy(),
            surprise: emotions.surprise(),
            anger: emotions.anger(),
            created_at: created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }

    /// Trim and check post text
    pub fn validate_text(text: &str) -> Result<String, DomainError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::EmptyText);
        }
        if text.chars().count() > MAX_TEXT_CHARS {
            return Err(DomainError::ContentTooLong {
                max: MAX_TEXT_CHARS,
            });
        }
        Ok(text.to_string())
    }

    /// Emotions stored with the post
    pub fn emotions(&self) -> Result<EmotionState, DomainError> {
        EmotionState::new(
            i64::from(self.joy),
            i64::from(self.surprise),
            i64::from(self.anger),
        )
    }

    /// Parsed creation instant, if the stored timestamp is readable
    pub fn created_instant(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    #[inline]
    pub fn is_authored_by(&self, user: &UserId) -> bool {
        &self.user_id == user
    }
}

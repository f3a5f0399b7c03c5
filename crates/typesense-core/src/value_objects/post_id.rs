//! Post ID - storage key doubling as the post's identity
//!
//! Format: `post:<creation millis>:<author id>`. Records written under the
//! older `posts:` namespace keep whatever id they were stored with; both forms
//! are accepted when parsing.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::keys::{LEGACY_POST_PREFIX, POST_PREFIX};
use crate::value_objects::UserId;

/// Identifier of a stored post
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostId(String);

impl PostId {
    /// Build the id for a post created at `millis` by `author`
    pub fn from_parts(millis: i64, author: &UserId) -> Self {
        Self(format!("{POST_PREFIX}{millis}:{author}"))
    }

    /// Parse an id from a path parameter or stored record
    pub fn parse(s: &str) -> Result<Self, PostIdParseError> {
        let rest = s
            .strip_prefix(POST_PREFIX)
            .or_else(|| s.strip_prefix(LEGACY_POST_PREFIX))
            .ok_or(PostIdParseError::UnknownNamespace)?;
        if rest.is_empty() {
            return Err(PostIdParseError::Empty);
        }
        Ok(Self(s.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id lives in the legacy `posts:` namespace
    pub fn is_legacy(&self) -> bool {
        self.0.starts_with(LEGACY_POST_PREFIX)
    }

    /// Creation time embedded in a current-namespace id
    pub fn timestamp_millis(&self) -> Option<i64> {
        let rest = self.0.strip_prefix(POST_PREFIX)?;
        let (millis, _) = rest.split_once(':')?;
        millis.parse().ok()
    }
}

/// Error when parsing a PostId from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PostIdParseError {
    #[error("post id must start with `post:` or `posts:`")]
    UnknownNamespace,

    #[error("post id has no body after its namespace")]
    Empty,
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PostId {
    type Error = PostIdParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        PostId::parse(&s)
    }
}

impl From<PostId> for String {
    fn from(id: PostId) -> Self {
        id.0
    }
}

impl std::str::FromStr for PostId {
    type Err = PostIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PostId::parse(s)
    }
}

/// Thread-safe post id generator
///
/// Hands out strictly increasing creation milliseconds, so one process never
/// issues the same id twice even when a user posts twice within a millisecond.
#[derive(Debug, Default)]
pub struct PostIdGenerator {
    last_millis: AtomicI64,
}

impl PostIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate the id and creation instant for a new post by `author`
    pub fn generate(&self, author: &UserId) -> (PostId, DateTime<Utc>) {
        let now = Utc::now().timestamp_millis();
        let previous = self
            .last_millis
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or(now);
        let millis = now.max(previous + 1);

        let created_at = Utc
            .timestamp_millis_opt(millis)
            .single()
            .unwrap_or_else(Utc::now);

        (PostId::from_parts(millis, author), created_at)
    }
}

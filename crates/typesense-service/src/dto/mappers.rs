//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use typesense_core::{ReactionSet, TypographyResult, User, UserId};

use super::responses::{ReactionSummary, TypographyResponse, UserResponse};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Typography Mappers
// ============================================================================

impl From<&TypographyResult> for TypographyResponse {
    fn from(result: &TypographyResult) -> Self {
        Self {
            leading: result.leading,
            tracking: result.tracking,
            explanation: result.explanation.clone(),
            dominant: result.dominant.as_str().to_string(),
            strength: result.strength,
            line: result.rule.line.as_str().to_string(),
            letter: result.rule.letter.as_str().to_string(),
        }
    }
}

impl From<TypographyResult> for TypographyResponse {
    fn from(result: TypographyResult) -> Self {
        Self::from(&result)
    }
}

// ============================================================================
// Reaction Mappers
// ============================================================================

/// Buckets in emoji order, flagged for `viewer`
pub fn reaction_summaries(set: &ReactionSet, viewer: Option<&UserId>) -> Vec<ReactionSummary> {
    set.buckets()
        .map(|bucket| ReactionSummary {
            emoji: bucket.emoji().to_string(),
            count: bucket.count(),
            users: bucket.users().map(ToString::to_string).collect(),
            me: viewer.is_some_and(|user| bucket.contains(user)),
        })
        .collect()
}

//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use serde::Serialize;
use typesense_core::{EmojiCategory, Post, TypographyResult};

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

impl AuthResponse {
    pub fn new(
        access_token: String,
        refresh_token: String,
        expires_in: i64,
        user: UserResponse,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Profile of the authenticated user
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Typography Responses
// ============================================================================

/// Derived spacing with its explanation
#[derive(Debug, Clone, Serialize)]
pub struct TypographyResponse {
    pub leading: f64,
    pub tracking: f64,
    pub explanation: String,
    pub dominant: String,
    pub strength: u8,
    pub line: String,
    pub letter: String,
}

/// Preview answer; `typography` is null when a newer preview took over
#[derive(Debug, Clone, Serialize)]
pub struct PreviewResponse {
    pub typography: Option<TypographyResponse>,
    pub superseded: bool,
}

impl PreviewResponse {
    pub fn computed(result: &TypographyResult) -> Self {
        Self {
            typography: Some(result.into()),
            superseded: false,
        }
    }

    pub fn superseded() -> Self {
        Self {
            typography: None,
            superseded: true,
        }
    }
}

// ============================================================================
// Post Responses
// ============================================================================

/// A single post with its recomputed explanation
#[derive(Debug, Clone, Serialize)]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: Post,
    pub explanation: String,
}

/// Feed listing
///
/// A failed storage round yields `degraded: true`, no posts and the reason.
#[derive(Debug, Clone, Serialize)]
pub struct FeedResponse {
    pub posts: Vec<Post>,
    pub degraded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FeedResponse {
    pub fn ok(posts: Vec<Post>) -> Self {
        Self {
            posts,
            degraded: false,
            error: None,
        }
    }

    pub fn degraded(reason: impl Into<String>) -> Self {
        Self {
            posts: Vec::new(),
            degraded: true,
            error: Some(reason.into()),
        }
    }
}

// ============================================================================
// Reaction Responses
// ============================================================================

/// One reaction bucket as shown to a viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactionSummary {
    pub emoji: String,
    pub count: usize,
    pub users: Vec<String>,
    /// Whether the viewing user is in this bucket
    pub me: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReactionsResponse {
    pub post_id: String,
    pub reactions: Vec<ReactionSummary>,
    pub total: usize,
}

/// Result of toggling one emoji
#[derive(Debug, Clone, Serialize)]
pub struct ToggleReactionResponse {
    pub post_id: String,
    pub emoji: String,
    /// True when the user's reaction now exists
    pub reacted: bool,
    pub reactions: Vec<ReactionSummary>,
}

/// Reaction picker palette
#[derive(Debug, Clone, Serialize)]
pub struct EmojiCatalogResponse {
    pub categories: &'static [EmojiCategory],
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub storage: String,
}

impl ReadinessResponse {
    pub fn ready(storage_healthy: bool) -> Self {
        Self {
            status: if storage_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                storage: if storage_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Domain rules (emotion range, post length, emoji shape) are enforced again
//! by the core types when the request is turned into domain values.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// Account sign-up request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 50, message = "Name must be 1-50 characters"))]
    pub name: String,
}

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

// ============================================================================
// Profile Requests
// ============================================================================

/// Create or rename the caller's profile
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 50, message = "Name must be 1-50 characters"))]
    pub name: String,
}

// ============================================================================
// Post Requests
// ============================================================================

/// Create post request
///
/// Emotions left out default to 5. `leading` and `tracking` are optional;
/// when present they must equal the values derived from the emotions.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub text: String,

    /// Author for unauthenticated callers; ignored when a token is present
    #[validate(length(min = 1, max = 128, message = "user_id must be 1-128 characters"))]
    pub user_id: Option<String>,

    #[validate(length(max = 50, message = "Name must be at most 50 characters"))]
    pub name: Option<String>,

    pub leading: Option<f64>,
    pub tracking: Option<f64>,

    pub joy: Option<i64>,
    pub surprise: Option<i64>,
    pub anger: Option<i64>,
}

// ============================================================================
// Typography Requests
// ============================================================================

/// Typography preview request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PreviewRequest {
    pub joy: Option<i64>,
    pub surprise: Option<i64>,
    pub anger: Option<i64>,

    /// Opt into latest-wins gating across this client's previews
    #[validate(length(min = 1, max = 64, message = "client_id must be 1-64 characters"))]
    pub client_id: Option<String>,
}

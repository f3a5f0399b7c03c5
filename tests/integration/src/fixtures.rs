//! Test fixtures and data generators
//!
//! Request bodies the tests send and the response shapes they read back.

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::helpers::{assert_json, TestServer};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Sign-up request
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl SignupRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            email: format!("writer{suffix}@example.com"),
            password: "TestPass123!".to_string(),
            name: format!("Writer {suffix}"),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_signup(signup: &SignupRequest) -> Self {
        Self {
            email: signup.email.clone(),
            password: signup.password.clone(),
        }
    }
}

/// Refresh token request
#[derive(Debug, Serialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

/// User response
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// Post creation body; absent fields are omitted from the JSON
#[derive(Debug, Default, Serialize)]
pub struct CreatePostRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joy: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surprise: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anger: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leading: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking: Option<f64>,
}

impl CreatePostRequest {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn anonymous(text: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            ..Self::text(text)
        }
    }

    pub fn with_emotions(mut self, joy: i64, surprise: i64, anger: i64) -> Self {
        self.joy = Some(joy);
        self.surprise = Some(surprise);
        self.anger = Some(anger);
        self
    }
}

/// Stored post as returned by the API
#[derive(Debug, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub user_id: String,
    pub text: String,
    pub name: String,
    pub leading: f64,
    pub tracking: f64,
    pub joy: u8,
    pub surprise: u8,
    pub anger: u8,
    pub created_at: String,
}

/// Single post with its typography explanation
#[derive(Debug, Deserialize)]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    pub explanation: String,
}

/// Feed listing
#[derive(Debug, Deserialize)]
pub struct FeedResponse {
    pub posts: Vec<PostResponse>,
    pub degraded: bool,
    pub error: Option<String>,
}

/// Preview request
#[derive(Debug, Default, Serialize)]
pub struct PreviewRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joy: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surprise: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anger: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

impl PreviewRequest {
    pub fn new(joy: i64, surprise: i64, anger: i64) -> Self {
        Self {
            joy: Some(joy),
            surprise: Some(surprise),
            anger: Some(anger),
            client_id: None,
        }
    }

    pub fn for_client(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }
}

/// Derived typography
#[derive(Debug, Deserialize)]
pub struct TypographyResponse {
    pub leading: f64,
    pub tracking: f64,
    pub explanation: String,
    pub dominant: String,
    pub strength: u8,
}

/// Preview answer
#[derive(Debug, Deserialize)]
pub struct PreviewResponse {
    pub typography: Option<TypographyResponse>,
    pub superseded: bool,
}

/// One emoji bucket
#[derive(Debug, Deserialize)]
pub struct ReactionSummary {
    pub emoji: String,
    pub count: usize,
    pub users: Vec<String>,
    pub me: bool,
}

/// Reaction listing for a post
#[derive(Debug, Deserialize)]
pub struct ReactionsResponse {
    pub post_id: String,
    pub reactions: Vec<ReactionSummary>,
    pub total: usize,
}

/// Result of a toggle
#[derive(Debug, Deserialize)]
pub struct ToggleReactionResponse {
    pub post_id: String,
    pub emoji: String,
    pub reacted: bool,
    pub reactions: Vec<ReactionSummary>,
}

/// Emoji picker category
#[derive(Debug, Deserialize)]
pub struct EmojiCategory {
    pub name: String,
    pub emojis: Vec<String>,
}

/// Emoji picker catalog
#[derive(Debug, Deserialize)]
pub struct EmojiCatalogResponse {
    pub categories: Vec<EmojiCategory>,
}

/// Sign up a fresh account
pub async fn signup_user(server: &TestServer) -> Result<(SignupRequest, AuthResponse)> {
    let request = SignupRequest::unique();
    let response = server.post("/api/v1/auth/signup", &request).await?;
    let auth = assert_json(response, StatusCode::CREATED).await?;
    Ok((request, auth))
}

/// Create a post as an authenticated user
pub async fn create_post(
    server: &TestServer,
    token: &str,
    request: &CreatePostRequest,
) -> Result<PostResponse> {
    let response = server.post_auth("/api/v1/posts", token, request).await?;
    assert_json(response, StatusCode::CREATED).await
}

/// Percent-encode a path segment so emoji survive the URL
pub fn encode_segment(segment: &str) -> String {
    segment
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{b:02X}"),
        })
        .collect()
}

/// `/api/v1/posts/{id}/reactions/{emoji}`
pub fn reaction_path(post_id: &str, emoji: &str) -> String {
    format!(
        "/api/v1/posts/{}/reactions/{}",
        encode_segment(post_id),
        encode_segment(emoji)
    )
}

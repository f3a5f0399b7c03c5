//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreatePostRequest, LoginRequest, PreviewRequest, RefreshTokenRequest, SignupRequest,
    UpdateProfileRequest,
};

pub use responses::{
    AuthResponse, EmojiCatalogResponse, FeedResponse, HealthChecks, HealthResponse,
    PostDetailResponse, PreviewResponse, ReactionSummary, ReactionsResponse, ReadinessResponse,
    ToggleReactionResponse, TypographyResponse, UserResponse,
};

pub use mappers::reaction_summaries;

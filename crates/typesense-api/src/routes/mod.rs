//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, post},
    Router,
};

use typesense_common::RateLimitConfig;

use crate::handlers::{auth, health, posts, profile, reactions, typography};
use crate::middleware::apply_rate_limit;
use crate::state::AppState;

/// Create the main API router (excluding health for separate middleware handling)
///
/// Everything under /api/v1 except the polled reads sits behind the rate
/// limiter.
pub fn create_router(rate_limit: &RateLimitConfig) -> Router<AppState> {
    let limited = apply_rate_limit(api_v1_routes(), rate_limit);
    Router::new().nest("/api/v1", limited.merge(polling_routes()))
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Feed and reaction reads that clients poll to refresh
pub fn polling_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(posts::list_posts))
        .route("/posts/my", get(posts::list_my_posts))
        .route("/posts/:post_id/reactions", get(reactions::list_reactions))
}

/// Rate-limited API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(profile_routes())
        .merge(typography_routes())
        .merge(post_routes())
        .merge(reaction_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
}

fn profile_routes() -> Router<AppState> {
    Router::new().route(
        "/profile",
        get(profile::get_profile).post(profile::update_profile),
    )
}

fn typography_routes() -> Router<AppState> {
    Router::new().route("/typography/preview", post(typography::preview))
}

/// Post creation and detail routes
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", post(posts::create_post))
        .route("/posts/:post_id", get(posts::get_post))
}

/// Reaction toggle and emoji catalog routes
fn reaction_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/posts/:post_id/reactions/:emoji",
            post(reactions::toggle_reaction),
        )
        .route("/reactions/emojis", get(reactions::list_emojis))
}

//! API Integration Tests
//!
//! Each test spawns its own server on the in-memory backend, so no external
//! services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use std::time::Duration;

use futures::future::join_all;
use integration_tests::{
    assert_error_code, assert_json, assert_status, create_post, fixtures::*, test_config,
    TestServer,
};
use reqwest::StatusCode;
use serde_json::{json, Value};
use typesense_common::AppConfig;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["storage"], "healthy");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_signup_user() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (request, auth) = signup_user(&server).await.unwrap();

    assert_eq!(auth.user.email, request.email);
    assert_eq!(auth.user.name, request.name);
    assert_eq!(auth.token_type, "Bearer");
    assert!(!auth.access_token.is_empty());
    assert!(!auth.refresh_token.is_empty());
}

#[tokio::test]
async fn test_signup_duplicate_email_ignores_case() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (request, _) = signup_user(&server).await.unwrap();

    let shouted = SignupRequest {
        email: request.email.to_uppercase(),
        ..request
    };
    let response = server.post("/api/v1/auth/signup", &shouted).await.unwrap();
    let code = assert_error_code(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_signup_rejects_invalid_email() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = SignupRequest {
        email: "not-an-email".to_string(),
        ..SignupRequest::unique()
    };

    let response = server.post("/api/v1/auth/signup", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_login() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (signup, created) = signup_user(&server).await.unwrap();

    let response = server
        .post("/api/v1/auth/login", &LoginRequest::from_signup(&signup))
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(auth.user.id, created.user.id);
    assert!(!auth.access_token.is_empty());
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (signup, _) = signup_user(&server).await.unwrap();

    let wrong_password = LoginRequest {
        email: signup.email,
        password: "WrongPass999!".to_string(),
    };
    let response = server.post("/api/v1/auth/login", &wrong_password).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let unknown = LoginRequest {
        email: "nobody@example.com".to_string(),
        password: "whatever".to_string(),
    };
    let response = server.post("/api/v1/auth/login", &unknown).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_token() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = signup_user(&server).await.unwrap();

    let request = RefreshTokenRequest {
        refresh_token: auth.refresh_token,
    };
    let response = server.post("/api/v1/auth/refresh", &request).await.unwrap();
    let refreshed: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(refreshed.user.id, auth.user.id);
    assert!(!refreshed.access_token.is_empty());
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = signup_user(&server).await.unwrap();

    let request = RefreshTokenRequest {
        refresh_token: auth.access_token,
    };
    let response = server.post("/api/v1/auth/refresh", &request).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Profile Tests
// ============================================================================

#[tokio::test]
async fn test_profile_get_and_rename() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (signup, auth) = signup_user(&server).await.unwrap();

    let response = server
        .get_auth("/api/v1/profile", &auth.access_token)
        .await
        .unwrap();
    let profile: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.name, signup.name);

    let response = server
        .post_auth(
            "/api/v1/profile",
            &auth.access_token,
            &json!({"name": "こころ"}),
        )
        .await
        .unwrap();
    let renamed: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(renamed.name, "こころ");
    assert_eq!(renamed.email, signup.email);
}

#[tokio::test]
async fn test_profile_requires_token() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/v1/profile").await.unwrap();
    let code = assert_error_code(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
    assert_eq!(code, "MISSING_AUTHORIZATION");

    let response = server
        .get_auth("/api/v1/profile", "garbage.token.value")
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_profile_rejects_empty_name() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = signup_user(&server).await.unwrap();

    let response = server
        .post_auth("/api/v1/profile", &auth.access_token, &json!({"name": ""}))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Typography Preview Tests
// ============================================================================

#[tokio::test]
async fn test_preview_strong_joy() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/api/v1/typography/preview", &PreviewRequest::new(9, 0, 0))
        .await
        .unwrap();
    let preview: PreviewResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(!preview.superseded);
    let typography = preview.typography.expect("computed preview");
    assert_eq!(typography.leading, 1.5);
    assert_eq!(typography.tracking, -0.08);
    assert_eq!(typography.dominant, "joy");
    assert_eq!(typography.strength, 9);
}

#[tokio::test]
async fn test_preview_anger_dominant_with_surprise_note() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/api/v1/typography/preview", &PreviewRequest::new(2, 8, 8))
        .await
        .unwrap();
    let preview: PreviewResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let typography = preview.typography.expect("computed preview");
    assert_eq!(typography.dominant, "anger");
    assert_eq!(typography.leading, 2.2);
    assert_eq!(typography.tracking, -0.08);
    assert!(typography.explanation.contains("surprise"));
}

#[tokio::test]
async fn test_preview_defaults_missing_levels() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/api/v1/typography/preview", &PreviewRequest::default())
        .await
        .unwrap();
    let preview: PreviewResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let typography = preview.typography.expect("computed preview");
    assert_eq!(typography.dominant, "joy");
    assert_eq!(typography.strength, 5);
    assert_eq!(typography.leading, 1.5);
    assert_eq!(typography.tracking, 0.0);
}

#[tokio::test]
async fn test_preview_out_of_range() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/api/v1/typography/preview", &PreviewRequest::new(10, 0, 0))
        .await
        .unwrap();
    let code = assert_error_code(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert_eq!(code, "EMOTION_OUT_OF_RANGE");
}

#[tokio::test]
async fn test_preview_latest_request_wins() {
    let mut config = test_config();
    config.typography.preview_delay_ms = 300;
    let server = TestServer::start_with_config(config)
        .await
        .expect("Failed to start server");

    let slow = PreviewRequest::new(1, 0, 0).for_client("slider");
    let fast = PreviewRequest::new(9, 0, 0).for_client("slider");

    let first = server.post("/api/v1/typography/preview", &slow);
    let second = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        server.post("/api/v1/typography/preview", &fast).await
    };
    let (first, second) = tokio::join!(first, second);

    let first: PreviewResponse = assert_json(first.unwrap(), StatusCode::OK).await.unwrap();
    let second: PreviewResponse = assert_json(second.unwrap(), StatusCode::OK)
        .await
        .unwrap();

    assert!(first.superseded);
    assert!(first.typography.is_none());
    assert!(!second.superseded);
    assert_eq!(second.typography.expect("latest preview").strength, 9);
}

// ============================================================================
// Post Tests
// ============================================================================

#[tokio::test]
async fn test_create_post_authenticated() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (signup, auth) = signup_user(&server).await.unwrap();

    let request = CreatePostRequest::text("今日はいい日").with_emotions(9, 0, 0);
    let post = create_post(&server, &auth.access_token, &request)
        .await
        .unwrap();

    assert!(post.id.starts_with("post:"));
    assert_eq!(post.user_id, auth.user.id);
    assert_eq!(post.name, signup.name);
    assert_eq!(post.text, "今日はいい日");
    assert_eq!((post.leading, post.tracking), (1.5, -0.08));
    assert_eq!((post.joy, post.surprise, post.anger), (9, 0, 0));
    assert!(!post.created_at.is_empty());
}

#[tokio::test]
async fn test_create_post_anonymous_uses_default_name() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post(
            "/api/v1/posts",
            &CreatePostRequest::anonymous("hello", "guest-1"),
        )
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(post.user_id, "guest-1");
    assert_eq!(post.name, "名無し");
    assert_eq!((post.joy, post.surprise, post.anger), (5, 5, 5));
}

#[tokio::test]
async fn test_create_post_requires_author() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/api/v1/posts", &CreatePostRequest::text("who am i"))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_create_post_rejects_bad_text() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/api/v1/posts", &CreatePostRequest::anonymous("   ", "guest"))
        .await
        .unwrap();
    let code = assert_error_code(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert_eq!(code, "EMPTY_TEXT");

    let response = server
        .post(
            "/api/v1/posts",
            &CreatePostRequest::anonymous("あ".repeat(121), "guest"),
        )
        .await
        .unwrap();
    let code = assert_error_code(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert_eq!(code, "CONTENT_TOO_LONG");
}

#[tokio::test]
async fn test_create_post_rejects_out_of_range_emotion() {
    let server = TestServer::start().await.expect("Failed to start server");

    let request = CreatePostRequest::anonymous("hi", "guest").with_emotions(0, -1, 0);
    let response = server.post("/api/v1/posts", &request).await.unwrap();
    let code = assert_error_code(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert_eq!(code, "EMOTION_OUT_OF_RANGE");
}

#[tokio::test]
async fn test_create_post_rejects_mismatched_spacing() {
    let server = TestServer::start().await.expect("Failed to start server");

    let request = CreatePostRequest {
        leading: Some(2.2),
        tracking: Some(0.15),
        ..CreatePostRequest::anonymous("hi", "guest").with_emotions(9, 0, 0)
    };
    let response = server.post("/api/v1/posts", &request).await.unwrap();
    let code = assert_error_code(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert_eq!(code, "TYPOGRAPHY_MISMATCH");

    let matching = CreatePostRequest {
        leading: Some(1.5),
        tracking: Some(-0.08),
        ..CreatePostRequest::anonymous("hi", "guest").with_emotions(9, 0, 0)
    };
    let response = server.post("/api/v1/posts", &matching).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
}

#[tokio::test]
async fn test_feed_lists_newest_first() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = signup_user(&server).await.unwrap();

    let mut ids = Vec::new();
    for text in ["first", "second", "third"] {
        let post = create_post(&server, &auth.access_token, &CreatePostRequest::text(text))
            .await
            .unwrap();
        ids.push(post.id);
    }

    let response = server.get("/api/v1/posts").await.unwrap();
    let feed: FeedResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(!feed.degraded);
    assert!(feed.error.is_none());
    let listed: Vec<String> = feed.posts.into_iter().map(|p| p.id).collect();
    ids.reverse();
    assert_eq!(listed, ids);
}

#[tokio::test]
async fn test_feed_polling_is_never_throttled() {
    let config = AppConfig::in_memory(0, "integration-test-secret");
    let polls = config.rate_limit.burst + 10;
    let server = TestServer::start_with_config(config)
        .await
        .expect("Failed to start server");

    for _ in 0..polls {
        let response = server.get("/api/v1/posts").await.unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }
}

#[tokio::test]
async fn test_my_posts_filters_by_token_user() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, alice) = signup_user(&server).await.unwrap();
    let (_, bob) = signup_user(&server).await.unwrap();

    create_post(&server, &alice.access_token, &CreatePostRequest::text("alice"))
        .await
        .unwrap();
    create_post(&server, &bob.access_token, &CreatePostRequest::text("bob"))
        .await
        .unwrap();

    let response = server
        .get_auth("/api/v1/posts/my", &alice.access_token)
        .await
        .unwrap();
    let feed: FeedResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(feed.posts.len(), 1);
    assert_eq!(feed.posts[0].user_id, alice.user.id);

    let response = server.get("/api/v1/posts/my").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_get_post_detail() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = signup_user(&server).await.unwrap();
    let post = create_post(
        &server,
        &auth.access_token,
        &CreatePostRequest::text("detail").with_emotions(0, 0, 9),
    )
    .await
    .unwrap();

    let response = server
        .get(&format!("/api/v1/posts/{}", encode_segment(&post.id)))
        .await
        .unwrap();
    let detail: PostDetailResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(detail.post.id, post.id);
    assert!(detail.explanation.contains("anger"));
}

#[tokio::test]
async fn test_get_unknown_post() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .get(&format!(
            "/api/v1/posts/{}",
            encode_segment("post:1700000000000:nobody")
        ))
        .await
        .unwrap();
    let code = assert_error_code(response, StatusCode::NOT_FOUND)
        .await
        .unwrap();
    assert_eq!(code, "UNKNOWN_POST");

    let response = server.get("/api/v1/posts/not-a-post-id").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_toggle_reaction_adds_then_removes() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = signup_user(&server).await.unwrap();
    let post = create_post(&server, &auth.access_token, &CreatePostRequest::text("react"))
        .await
        .unwrap();
    let path = reaction_path(&post.id, "👍");

    let response = server
        .post_empty_auth(&path, &auth.access_token)
        .await
        .unwrap();
    let added: ToggleReactionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(added.reacted);
    assert_eq!(added.post_id, post.id);
    assert_eq!(added.emoji, "👍");
    assert_eq!(added.reactions.len(), 1);
    assert_eq!(added.reactions[0].count, 1);
    assert_eq!(added.reactions[0].users, vec![auth.user.id.clone()]);
    assert!(added.reactions[0].me);

    let response = server
        .post_empty_auth(&path, &auth.access_token)
        .await
        .unwrap();
    let removed: ToggleReactionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!removed.reacted);
    assert!(removed.reactions.is_empty());
}

#[tokio::test]
async fn test_list_reactions_marks_viewer() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, alice) = signup_user(&server).await.unwrap();
    let (_, bob) = signup_user(&server).await.unwrap();
    let post = create_post(&server, &alice.access_token, &CreatePostRequest::text("hi"))
        .await
        .unwrap();

    for (token, emoji) in [
        (&alice.access_token, "👍"),
        (&bob.access_token, "👍"),
        (&bob.access_token, "🎉"),
    ] {
        let response = server
            .post_empty_auth(&reaction_path(&post.id, emoji), token)
            .await
            .unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    let list_path = format!("/api/v1/posts/{}/reactions", encode_segment(&post.id));

    let response = server
        .get_auth(&list_path, &alice.access_token)
        .await
        .unwrap();
    let listed: ReactionsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listed.post_id, post.id);
    assert_eq!(listed.total, 3);

    let thumbs = listed
        .reactions
        .iter()
        .find(|r| r.emoji == "👍")
        .expect("thumbs bucket");
    assert_eq!(thumbs.count, 2);
    assert!(thumbs.me);
    let party = listed
        .reactions
        .iter()
        .find(|r| r.emoji == "🎉")
        .expect("party bucket");
    assert!(!party.me);

    let response = server.get(&list_path).await.unwrap();
    let anonymous: ReactionsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(anonymous.reactions.iter().all(|r| !r.me));
}

#[tokio::test]
async fn test_reactions_for_post_without_any() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = signup_user(&server).await.unwrap();
    let post = create_post(&server, &auth.access_token, &CreatePostRequest::text("quiet"))
        .await
        .unwrap();

    let response = server
        .get(&format!(
            "/api/v1/posts/{}/reactions",
            encode_segment(&post.id)
        ))
        .await
        .unwrap();
    let listed: ReactionsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(listed.reactions.is_empty());
    assert_eq!(listed.total, 0);
}

#[tokio::test]
async fn test_toggle_reaction_errors() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = signup_user(&server).await.unwrap();

    let response = server
        .post_empty_auth(
            &reaction_path("post:1700000000000:ghost", "👍"),
            &auth.access_token,
        )
        .await
        .unwrap();
    let code = assert_error_code(response, StatusCode::NOT_FOUND)
        .await
        .unwrap();
    assert_eq!(code, "UNKNOWN_POST");

    let post = create_post(&server, &auth.access_token, &CreatePostRequest::text("x"))
        .await
        .unwrap();
    let response = server
        .post_empty_auth(&reaction_path(&post.id, "a b"), &auth.access_token)
        .await
        .unwrap();
    let code = assert_error_code(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert_eq!(code, "INVALID_EMOJI");

    let response = server
        .client
        .post(format!("{}{}", server.base_url(), reaction_path(&post.id, "👍")))
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_concurrent_toggles_are_all_counted() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, author) = signup_user(&server).await.unwrap();
    let post = create_post(&server, &author.access_token, &CreatePostRequest::text("busy"))
        .await
        .unwrap();

    let mut tokens = Vec::new();
    for _ in 0..8 {
        let (_, auth) = signup_user(&server).await.unwrap();
        tokens.push(auth.access_token);
    }

    let path = reaction_path(&post.id, "🔥");
    let toggles = tokens
        .iter()
        .map(|token| server.post_empty_auth(&path, token));
    for response in join_all(toggles).await {
        assert_status(response.unwrap(), StatusCode::OK).await.unwrap();
    }

    let response = server
        .get(&format!(
            "/api/v1/posts/{}/reactions",
            encode_segment(&post.id)
        ))
        .await
        .unwrap();
    let listed: ReactionsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listed.total, 8);
}

#[tokio::test]
async fn test_emoji_catalog() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/v1/reactions/emojis").await.unwrap();
    let catalog: EmojiCatalogResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(!catalog.categories.is_empty());
    assert!(catalog
        .categories
        .iter()
        .any(|c| c.emojis.iter().any(|e| e == "👍")));
}

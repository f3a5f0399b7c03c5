//! Storage key conventions
//!
//! Everything lives in one key-addressed table; the key prefix is the only
//! thing separating record kinds.

use crate::value_objects::{PostId, UserId};

/// Current post namespace: `post:<millis>:<user_id>`
pub const POST_PREFIX: &str = "post:";

/// Older post namespace, still merged into feeds
pub const LEGACY_POST_PREFIX: &str = "posts:";

/// Reaction state per post: `reactions:<post_id>`
pub const REACTIONS_PREFIX: &str = "reactions:";

/// User profile: `user:<user_id>`
pub const USER_PREFIX: &str = "user:";

/// Email to user id index: `user_email:<lowercased email>`
pub const USER_EMAIL_PREFIX: &str = "user_email:";

/// Key under which a post is stored (the id itself)
pub fn post_key(id: &PostId) -> String {
    id.as_str().to_string()
}

/// Key holding the reaction buckets of a post
pub fn reactions_key(id: &PostId) -> String {
    format!("{REACTIONS_PREFIX}{id}")
}

pub fn user_key(id: &UserId) -> String {
    format!("{USER_PREFIX}{id}")
}

pub fn user_email_key(email: &str) -> String {
    format!("{USER_EMAIL_PREFIX}{}", email.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespaces_do_not_overlap() {
        assert!(!LEGACY_POST_PREFIX.starts_with(POST_PREFIX));
        let id = PostId::parse("post:1:u").unwrap();
        assert!(!reactions_key(&id).starts_with(POST_PREFIX));
        assert!(!user_key(&UserId::new("u").unwrap()).starts_with(POST_PREFIX));
    }

    #[test]
    fn test_key_formats() {
        let id = PostId::parse("post:1700000000000:u1").unwrap();
        assert_eq!(post_key(&id), "post:1700000000000:u1");
        assert_eq!(reactions_key(&id), "reactions:post:1700000000000:u1");
        assert_eq!(user_key(&UserId::new("u1").unwrap()), "user:u1");
        assert_eq!(user_email_key(" Me@Example.com "), "user_email:me@example.com");
    }
}

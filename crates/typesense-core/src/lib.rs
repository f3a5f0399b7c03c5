//! # typesense-core
//!
//! Domain layer: the emotion to typography engine, posts and feed assembly,
//! reaction sets, and the storage port trait.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod feed;
pub mod keys;
pub mod traits;
pub mod typography;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Post, ReactionBucket, ReactionSet, ToggleOutcome, User, ANONYMOUS_NAME, MAX_TEXT_CHARS,
};
pub use error::DomainError;
pub use feed::{assemble, decode_posts, FeedScope};
pub use traits::{KvStore, StoreResult};
pub use typography::{
    compute, DominantAxis, LatestWins, PreviewTicket, SpacingCategory, TypographyResult,
    TypographyRule,
};
pub use value_objects::{
    emoji_catalog, Emoji, EmojiCategory, EmotionAxis, EmotionState, PostId, PostIdGenerator,
    PostIdParseError, UserId,
};

//! Domain entities - core business objects

mod post;
mod reaction;
mod user;

pub use post::{Post, ANONYMOUS_NAME, DEFAULT_LEADING, MAX_TEXT_CHARS};
pub use reaction::{ReactionBucket, ReactionSet, ToggleOutcome};
pub use user::{User, MAX_DISPLAY_NAME_CHARS};

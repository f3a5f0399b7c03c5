//! Value objects - immutable types that represent domain concepts

mod emoji;
mod emotion;
mod post_id;
mod user_id;

pub use emoji::{emoji_catalog, Emoji, EmojiCategory, MAX_EMOJI_CHARS};
pub use emotion::{EmotionAxis, EmotionState, EMOTION_MAX};
pub use post_id::{PostId, PostIdGenerator, PostIdParseError};
pub use user_id::UserId;

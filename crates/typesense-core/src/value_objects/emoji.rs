//! Reaction emoji and the picker catalog

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Longest accepted emoji sequence, in code points (covers ZWJ sequences)
pub const MAX_EMOJI_CHARS: usize = 16;

/// Emoji used as a reaction bucket key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Emoji(String);

impl Emoji {
    /// Validate a reaction emoji
    ///
    /// Only the shape is checked (non-empty, short, no whitespace or control
    /// characters); emoji outside the catalog are allowed.
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::InvalidEmoji("emoji must not be empty".to_string()));
        }
        if value.chars().count() > MAX_EMOJI_CHARS {
            return Err(DomainError::InvalidEmoji(format!(
                "emoji must be at most {MAX_EMOJI_CHARS} characters"
            )));
        }
        if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(DomainError::InvalidEmoji(
                "emoji must not contain whitespace".to_string(),
            ));
        }
        Ok(Self(value))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Emoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One category of the reaction picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmojiCategory {
    pub name: &'static str,
    pub emojis: &'static [&'static str],
}

const CATALOG: &[EmojiCategory] = &[
    EmojiCategory {
        name: "positive",
        emojis: &[
            "😊", "😄", "🥰", "😍", "🤗", "😆", "😁", "🤩", "✨", "💖", "💕", "💓", "🌟", "⭐",
            "🎉", "🎊",
        ],
    },
    EmojiCategory {
        name: "cheer",
        emojis: &["👍", "👏", "💪", "🔥", "💯", "✅", "🙌", "👌", "💚", "❤️", "🧡", "💛"],
    },
    EmojiCategory {
        name: "cute",
        emojis: &["🥺", "😻", "🐱", "🐶", "🐰", "🦊", "🐻", "🌸", "🌺", "🌷", "🌼", "💐"],
    },
    EmojiCategory {
        name: "funny",
        emojis: &["😂", "🤣", "😹", "🤪", "😜", "😝", "😎", "🤡", "👻", "🎃", "🍕", "🍔"],
    },
    EmojiCategory {
        name: "amazing",
        emojis: &["😮", "😲", "🤯", "👀", "💡", "🚀", "🏆", "🥇", "👑", "💎", "⚡", "🌈"],
    },
    EmojiCategory {
        name: "sad",
        emojis: &["😢", "😭", "😿", "💔", "😔", "😞", "🥲", "😓", "😪", "💤", "🌧️", "☁️"],
    },
];

/// Categorized emoji offered by the reaction picker
pub fn emoji_catalog() -> &'static [EmojiCategory] {
    CATALOG
}

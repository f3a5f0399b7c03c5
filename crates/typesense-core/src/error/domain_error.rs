//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Post not found: {0}")]
    PostNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Emotion value out of range: {axis}={value} (expected 0-9)")]
    EmotionOutOfRange { axis: &'static str, value: i64 },

    #[error("Text is required")]
    EmptyText,

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    #[error("Invalid emoji: {0}")]
    InvalidEmoji(String),

    #[error("Typography does not match emotions: {0}")]
    TypographyMismatch(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid display name: {0}")]
    InvalidDisplayName(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Concurrent update conflict on key: {0}")]
    WriteConflict(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Corrupt record under key {key}: {reason}")]
    CorruptRecord { key: String, reason: String },

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::PostNotFound(_) => "UNKNOWN_POST",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::EmotionOutOfRange { .. } => "EMOTION_OUT_OF_RANGE",
            Self::EmptyText => "EMPTY_TEXT",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::InvalidEmoji(_) => "INVALID_EMOJI",
            Self::TypographyMismatch(_) => "TYPOGRAPHY_MISMATCH",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidDisplayName(_) => "INVALID_DISPLAY_NAME",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::WriteConflict(_) => "WRITE_CONFLICT",

            // Infrastructure
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::CorruptRecord { .. } => "CORRUPT_RECORD",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_) | Self::PostNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::EmotionOutOfRange { .. }
                | Self::EmptyText
                | Self::ContentTooLong { .. }
                | Self::InvalidEmoji(_)
                | Self::TypographyMismatch(_)
                | Self::InvalidEmail
                | Self::InvalidDisplayName(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists | Self::WriteConflict(_))
    }

    /// Check if the error originates from the storage collaborator
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::StorageError(_) | Self::CorruptRecord { .. })
    }
}

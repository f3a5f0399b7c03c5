//! Emotion state - the three user-supplied emotion intensities
//!
//! Every axis is an integer in `0..=9`. Values outside that range are a
//! caller contract violation and are rejected at construction time; they are
//! never clamped.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Highest intensity an emotion axis can carry
pub const EMOTION_MAX: u8 = 9;

/// Emotion axis names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionAxis {
    Joy,
    Surprise,
    Anger,
}

impl EmotionAxis {
    /// Lowercase axis name used in explanations and error messages
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Joy => "joy",
            Self::Surprise => "surprise",
            Self::Anger => "anger",
        }
    }
}

impl fmt::Display for EmotionAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable triple of emotion intensities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawEmotionState")]
pub struct EmotionState {
    joy: u8,
    surprise: u8,
    anger: u8,
}

impl EmotionState {
    /// Intensity used for every axis the caller leaves out
    pub const DEFAULT_LEVEL: u8 = 5;

    /// Create a new EmotionState, failing on any value outside `0..=9`
    pub fn new(joy: i64, surprise: i64, anger: i64) -> Result<Self, DomainError> {
        Ok(Self {
            joy: check_level(EmotionAxis::Joy, joy)?,
            surprise: check_level(EmotionAxis::Surprise, surprise)?,
            anger: check_level(EmotionAxis::Anger, anger)?,
        })
    }

    /// Build from optional inputs, filling the gaps with the default level
    pub fn with_defaults(
        joy: Option<i64>,
        surprise: Option<i64>,
        anger: Option<i64>,
    ) -> Result<Self, DomainError> {
        let fallback = i64::from(Self::DEFAULT_LEVEL);
        Self::new(
            joy.unwrap_or(fallback),
            surprise.unwrap_or(fallback),
            anger.unwrap_or(fallback),
        )
    }

    #[inline]
    pub const fn joy(&self) -> u8 {
        self.joy
    }

    #[inline]
    pub const fn surprise(&self) -> u8 {
        self.surprise
    }

    #[inline]
    pub const fn anger(&self) -> u8 {
        self.anger
    }

    /// Intensity on a given axis
    pub const fn level(&self, axis: EmotionAxis) -> u8 {
        match axis {
            EmotionAxis::Joy => self.joy,
            EmotionAxis::Surprise => self.surprise,
            EmotionAxis::Anger => self.anger,
        }
    }
}

impl Default for EmotionState {
    fn default() -> Self {
        Self {
            joy: Self::DEFAULT_LEVEL,
            surprise: Self::DEFAULT_LEVEL,
            anger: Self::DEFAULT_LEVEL,
        }
    }
}

fn check_level(axis: EmotionAxis, value: i64) -> Result<u8, DomainError> {
    u8::try_from(value)
        .ok()
        .filter(|v| *v <= EMOTION_MAX)
        .ok_or(DomainError::EmotionOutOfRange {
            axis: axis.as_str(),
            value,
        })
}

#[derive(Deserialize)]
struct RawEmotionState {
    joy: i64,
    surprise: i64,
    anger: i64,
}

impl TryFrom<RawEmotionState> for EmotionState {
    type Error = DomainError;

    fn try_from(raw: RawEmotionState) -> Result<Self, Self::Error> {
        Self::new(raw.joy, raw.surprise, raw.anger)
    }
}

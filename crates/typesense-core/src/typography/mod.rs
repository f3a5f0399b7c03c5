//! Emotion to typography mapping
//!
//! An [`EmotionState`](crate::EmotionState) resolves to a line spacing
//! (leading) and a character spacing (tracking) through two hand-authored
//! lookup tables, one per dominant emotion.

mod engine;
mod latest;

use serde::{Deserialize, Serialize};

pub use engine::{compute, rule_for, ANGER_RULES, JOY_RULES, SURPRISE_NOTE_THRESHOLD};
pub use latest::{LatestWins, PreviewTicket};

/// Categorical spacing label used by the rule tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpacingCategory {
    Narrow,
    Normal,
    Wide,
}

impl SpacingCategory {
    /// Line-height multiplier for this category
    pub const fn leading(self) -> f64 {
        match self {
            Self::Narrow => 1.5,
            Self::Normal => 1.8,
            Self::Wide => 2.2,
        }
    }

    /// Letter-spacing in em for this category
    pub const fn tracking(self) -> f64 {
        match self {
            Self::Narrow => -0.08,
            Self::Normal => 0.0,
            Self::Wide => 0.15,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Narrow => "narrow",
            Self::Normal => "normal",
            Self::Wide => "wide",
        }
    }
}

/// Emotion whose intensity drives the rule lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DominantAxis {
    Joy,
    Anger,
}

impl DominantAxis {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Joy => "joy",
            Self::Anger => "anger",
        }
    }
}

/// One row of a rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypographyRule {
    pub line: SpacingCategory,
    pub letter: SpacingCategory,
}

/// Closed bounds every result must fall in
pub const LEADING_RANGE: (f64, f64) = (1.5, 2.2);
pub const TRACKING_RANGE: (f64, f64) = (-0.08, 0.15);

/// Display parameters derived from an emotion state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypographyResult {
    pub leading: f64,
    pub tracking: f64,
    pub explanation: String,
    pub dominant: DominantAxis,
    pub strength: u8,
    pub rule: TypographyRule,
}

impl TypographyResult {
    /// Whether leading and tracking sit inside the closed value ranges
    pub fn is_within_bounds(&self) -> bool {
        (LEADING_RANGE.0..=LEADING_RANGE.1).contains(&self.leading)
            && (TRACKING_RANGE.0..=TRACKING_RANGE.1).contains(&self.tracking)
    }

    /// Whether caller-supplied spacing agrees with this result
    pub fn matches(&self, leading: f64, tracking: f64) -> bool {
        const EPSILON: f64 = 1e-9;
        (self.leading - leading).abs() < EPSILON && (self.tracking - tracking).abs() < EPSILON
    }
}

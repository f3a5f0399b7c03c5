//! Rule tables and the pure compute function

use super::{DominantAxis, SpacingCategory, TypographyResult, TypographyRule};
use crate::value_objects::EmotionState;

use SpacingCategory::{Narrow, Normal, Wide};

/// Surprise at or above this level adds a note to the explanation
pub const SURPRISE_NOTE_THRESHOLD: u8 = 7;

const fn rule(line: SpacingCategory, letter: SpacingCategory) -> TypographyRule {
    TypographyRule { line, letter }
}

/// Joy table, indexed by strength 0..=9
pub const JOY_RULES: [TypographyRule; 10] = [
    rule(Normal, Normal), // 0
    rule(Narrow, Wide),   // 1
    rule(Normal, Wide),   // 2
    rule(Wide, Wide),     // 3
    rule(Wide, Normal),   // 4
    rule(Narrow, Normal), // 5
    rule(Normal, Normal), // 6
    rule(Wide, Narrow),   // 7
    rule(Normal, Narrow), // 8
    rule(Narrow, Narrow), // 9
];

/// Anger table, indexed by strength 0..=9
pub const ANGER_RULES: [TypographyRule; 10] = [
    rule(Normal, Normal), // 0
    rule(Wide, Wide),     // 1
    rule(Normal, Wide),   // 2
    rule(Narrow, Wide),   // 3
    rule(Wide, Normal),   // 4
    rule(Narrow, Normal), // 5
    rule(Normal, Normal), // 6
    rule(Normal, Narrow), // 7
    rule(Wide, Narrow),   // 8
    rule(Narrow, Narrow), // 9
];

/// Look up the rule row for a dominant axis and strength
///
/// `strength` is always within `0..=9` because it comes out of a validated
/// [`EmotionState`].
pub fn rule_for(axis: DominantAxis, strength: u8) -> TypographyRule {
    let table = match axis {
        DominantAxis::Joy => &JOY_RULES,
        DominantAxis::Anger => &ANGER_RULES,
    };
    table[usize::from(strength)]
}

/// Derive leading and tracking from an emotion state
///
/// Joy wins ties against anger. Surprise only affects the explanation.
pub fn compute(state: &EmotionState) -> TypographyResult {
    let (dominant, strength) = if state.joy() >= state.anger() {
        (DominantAxis::Joy, state.joy())
    } else {
        (DominantAxis::Anger, state.anger())
    };

    let rule = rule_for(dominant, strength);
    let leading = rule.line.leading();
    let tracking = rule.letter.tracking();

    let mut explanation = format!(
        "Dominant emotion: {} (strength: {strength})\n\
         Rule applied: line spacing={}, letter spacing={}\n\
         CSS values: line-height={leading}, letter-spacing={tracking:.2}em",
        dominant.as_str(),
        rule.line.as_str(),
        rule.letter.as_str(),
    );
    if state.surprise() >= SURPRISE_NOTE_THRESHOLD {
        explanation.push_str("\nNote: the surprise component is strongly expressed.");
    }

    let result = TypographyResult {
        leading,
        tracking,
        explanation,
        dominant,
        strength,
        rule,
    };

    assert!(
        result.is_within_bounds(),
        "typography rule tables produced out-of-range spacing: leading={leading}, tracking={tracking}"
    );

    result
}

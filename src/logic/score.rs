//! Score validation: win-by-2 / point-cap rules per set and per format.

use crate::models::{Format, SetScore};

/// Which side of a match won.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    A,
    B,
}

/// Cap/margin violations and malformed set lists; rejected synchronously
/// with a specific reason, no partial acceptance.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScoreError {
    /// Equal scores are never a finished set.
    TiedSet { a: u32, b: u32 },
    /// Neither side reached the point cap.
    BelowCap { cap: u32 },
    /// Finished exactly at the cap with a margin under 2.
    MarginAtCap { cap: u32 },
    /// Went past the cap with a margin other than 2.
    MarginPastCap { cap: u32 },
    /// Fewer sets than the format needs for a decision.
    TooFewSets { got: usize },
    /// More sets than the format allows.
    TooManySets { got: usize },
    /// Sets 1-2 split 1-1 and no decider was recorded.
    MissingDecider,
    /// Sets 1-2 already produced a 2-0; a non-empty decider is superfluous.
    SuperfluousDecider,
    /// The recorded sets produce no winner (2-set format drawn on sets and
    /// points).
    NoWinner,
}

impl std::fmt::Display for ScoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreError::TiedSet { a, b } => write!(f, "Set cannot end tied at {}-{}", a, b),
            ScoreError::BelowCap { cap } => write!(f, "Neither side reached {} points", cap),
            ScoreError::MarginAtCap { cap } => {
                write!(f, "A set finishing at {} needs a 2-point margin", cap)
            }
            ScoreError::MarginPastCap { cap } => {
                write!(f, "A set going past {} must end with exactly 2 points margin", cap)
            }
            ScoreError::TooFewSets { got } => write!(f, "Not enough sets recorded ({})", got),
            ScoreError::TooManySets { got } => write!(f, "Too many sets recorded ({})", got),
            ScoreError::MissingDecider => write!(f, "Sets split 1-1; a deciding set is required"),
            ScoreError::SuperfluousDecider => {
                write!(f, "Match already decided 2-0; remove the third set")
            }
            ScoreError::NoWinner => write!(f, "Recorded sets produce no winner"),
        }
    }
}

/// A set is valid iff one side reached the cap, the margin is at least 2 at
/// the cap, and exactly 2 past it.
pub fn validate_set(set: &SetScore, cap: u32) -> Result<(), ScoreError> {
    if set.a == set.b {
        return Err(ScoreError::TiedSet { a: set.a, b: set.b });
    }
    let hi = set.a.max(set.b);
    let lo = set.a.min(set.b);
    if hi < cap {
        return Err(ScoreError::BelowCap { cap });
    }
    let margin = hi - lo;
    if hi == cap && margin < 2 {
        return Err(ScoreError::MarginAtCap { cap });
    }
    if hi > cap && margin != 2 {
        return Err(ScoreError::MarginPastCap { cap });
    }
    Ok(())
}

fn set_winner(set: &SetScore) -> Side {
    if set.a > set.b {
        Side::A
    } else {
        Side::B
    }
}

/// Validate a full set list against the format and return the winning side.
///
/// Trailing 0-0 sets count as empty (an untouched decider input) and are
/// ignored.
pub fn winning_side(sets: &[SetScore], format: &Format) -> Result<Side, ScoreError> {
    let sets = trim_empty(sets);
    match format.sets_per_match {
        1 => single_set(sets, format),
        2 => two_sets(sets, format),
        _ => best_of_three(sets, format),
    }
}

fn trim_empty(sets: &[SetScore]) -> &[SetScore] {
    let mut end = sets.len();
    while end > 0 && sets[end - 1].a == 0 && sets[end - 1].b == 0 {
        end -= 1;
    }
    &sets[..end]
}

fn single_set(sets: &[SetScore], format: &Format) -> Result<Side, ScoreError> {
    match sets {
        [] => Err(ScoreError::TooFewSets { got: 0 }),
        [set] => {
            validate_set(set, format.points_per_set)?;
            Ok(set_winner(set))
        }
        _ => Err(ScoreError::TooManySets { got: sets.len() }),
    }
}

/// Two fixed sets: both are always played; the side with more set wins
/// takes the match, total points break a 1-1 split.
fn two_sets(sets: &[SetScore], format: &Format) -> Result<Side, ScoreError> {
    if sets.len() < 2 {
        return Err(ScoreError::TooFewSets { got: sets.len() });
    }
    if sets.len() > 2 {
        return Err(ScoreError::TooManySets { got: sets.len() });
    }
    for set in sets {
        validate_set(set, format.points_per_set)?;
    }
    let a_sets = sets.iter().filter(|s| set_winner(s) == Side::A).count();
    match a_sets {
        2 => Ok(Side::A),
        0 => Ok(Side::B),
        _ => {
            let a_total: u32 = sets.iter().map(|s| s.a).sum();
            let b_total: u32 = sets.iter().map(|s| s.b).sum();
            match a_total.cmp(&b_total) {
                std::cmp::Ordering::Greater => Ok(Side::A),
                std::cmp::Ordering::Less => Ok(Side::B),
                std::cmp::Ordering::Equal => Err(ScoreError::NoWinner),
            }
        }
    }
}

fn best_of_three(sets: &[SetScore], format: &Format) -> Result<Side, ScoreError> {
    if sets.len() < 2 {
        return Err(ScoreError::TooFewSets { got: sets.len() });
    }
    if sets.len() > 3 {
        return Err(ScoreError::TooManySets { got: sets.len() });
    }
    validate_set(&sets[0], format.points_per_set)?;
    validate_set(&sets[1], format.points_per_set)?;

    let first_two_a = sets[..2].iter().filter(|s| set_winner(s) == Side::A).count();
    match first_two_a {
        2 | 0 => {
            if sets.len() == 3 {
                return Err(ScoreError::SuperfluousDecider);
            }
            Ok(if first_two_a == 2 { Side::A } else { Side::B })
        }
        _ => {
            let Some(decider) = sets.get(2) else {
                return Err(ScoreError::MissingDecider);
            };
            validate_set(decider, format.points_per_decider)?;
            Ok(set_winner(decider))
        }
    }
}

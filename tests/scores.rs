//! Integration tests for score validation: set caps, margins, and the
//! per-format winner decision.

use racket_tournament_web::{validate_set, winning_side, Format, ScoreError, SetScore, Side};

fn score(a: u32, b: u32) -> SetScore {
    SetScore::new(a, b)
}

#[test]
fn set_at_cap_needs_two_point_margin() {
    assert!(validate_set(&score(21, 19), 21).is_ok());
    assert_eq!(
        validate_set(&score(21, 20), 21),
        Err(ScoreError::MarginAtCap { cap: 21 })
    );
}

#[test]
fn set_past_cap_needs_exactly_two_point_margin() {
    assert!(validate_set(&score(22, 20), 21).is_ok());
    assert!(validate_set(&score(30, 28), 21).is_ok());
    assert_eq!(
        validate_set(&score(23, 20), 21),
        Err(ScoreError::MarginPastCap { cap: 21 })
    );
}

#[test]
fn set_never_ends_tied() {
    assert_eq!(
        validate_set(&score(21, 21), 21),
        Err(ScoreError::TiedSet { a: 21, b: 21 })
    );
    assert_eq!(
        validate_set(&score(0, 0), 21),
        Err(ScoreError::TiedSet { a: 0, b: 0 })
    );
}

#[test]
fn set_below_cap_is_unfinished() {
    assert_eq!(
        validate_set(&score(20, 18), 21),
        Err(ScoreError::BelowCap { cap: 21 })
    );
}

#[test]
fn best_of_three_two_zero_skips_the_decider() {
    let format = Format::default();
    let sets = vec![score(21, 15), score(21, 18)];
    assert_eq!(winning_side(&sets, &format), Ok(Side::A));

    let sets = vec![score(15, 21), score(18, 21)];
    assert_eq!(winning_side(&sets, &format), Ok(Side::B));
}

#[test]
fn best_of_three_split_requires_the_decider() {
    let format = Format::default();
    let sets = vec![score(21, 15), score(19, 21)];
    assert_eq!(winning_side(&sets, &format), Err(ScoreError::MissingDecider));

    let sets = vec![score(21, 15), score(19, 21), score(15, 13)];
    assert_eq!(winning_side(&sets, &format), Ok(Side::A));
}

#[test]
fn decider_uses_its_own_cap() {
    let format = Format::default(); // decider cap 15
    let sets = vec![score(21, 15), score(19, 21), score(15, 14)];
    assert_eq!(
        winning_side(&sets, &format),
        Err(ScoreError::MarginAtCap { cap: 15 })
    );
    let sets = vec![score(21, 15), score(19, 21), score(16, 14)];
    assert_eq!(winning_side(&sets, &format), Ok(Side::A));
}

#[test]
fn superfluous_decider_is_rejected() {
    let format = Format::default();
    let sets = vec![score(21, 15), score(21, 18), score(15, 10)];
    assert_eq!(
        winning_side(&sets, &format),
        Err(ScoreError::SuperfluousDecider)
    );
}

#[test]
fn trailing_empty_decider_is_ignored() {
    let format = Format::default();
    // A 0-0 third set is an untouched input field, not a played set.
    let sets = vec![score(21, 15), score(21, 18), score(0, 0)];
    assert_eq!(winning_side(&sets, &format), Ok(Side::A));
}

#[test]
fn single_set_format() {
    let format = Format {
        sets_per_match: 1,
        ..Format::default()
    };
    assert_eq!(winning_side(&[score(19, 21)], &format), Ok(Side::B));
    assert_eq!(
        winning_side(&[score(21, 15), score(21, 15)], &format),
        Err(ScoreError::TooManySets { got: 2 })
    );
    assert_eq!(
        winning_side(&[], &format),
        Err(ScoreError::TooFewSets { got: 0 })
    );
}

#[test]
fn two_set_split_falls_back_to_total_points() {
    let format = Format {
        sets_per_match: 2,
        ..Format::default()
    };
    // 1-1 on sets, A ahead 33-31 on points.
    let sets = vec![score(21, 10), score(12, 21)];
    assert_eq!(winning_side(&sets, &format), Ok(Side::A));
    // 1-1 on sets and level on points: no winner.
    let sets = vec![score(21, 11), score(11, 21)];
    assert_eq!(winning_side(&sets, &format), Err(ScoreError::NoWinner));
}

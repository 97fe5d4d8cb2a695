//! Tournament format settings: scoring, seeding, pools, and bracket choice.

use crate::models::matches::SetScore;
use serde::{Deserialize, Serialize};

/// How competitors are distributed into pools.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedingMethod {
    /// Boustrophedon deal by seed for balanced pool strength.
    #[default]
    Snake,
    /// Shuffle, then round-robin deal.
    Random,
    /// Pools assigned by the organizer before start.
    Manual,
}

/// Priority between head-to-head result and point differential when
/// competitors are tied on points.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tiebreak {
    #[default]
    HeadToHeadFirst,
    PointDiffFirst,
}

/// Knockout topology played after the pool phase.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketKind {
    /// Exactly 4 pools: winners bye to quarterfinals, 2nd/3rd play an
    /// intermediate round, 4th place eliminated.
    #[default]
    FixedFour,
    /// 2-8 pools: winners plus best runners-up fill an 8-slot bracket.
    General,
    /// Full placement tree resolving every rank 1..N.
    PlacementTree,
    /// Shortened main round: qualification plus independent 1-8, 9-12 and
    /// 13-16 brackets, resolving every rank of a 4-pool field.
    ShortenedMain,
}

/// Format/settings object supplied at tournament creation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Format {
    /// 1 = single set, 2 = two fixed sets, 3 = best of three.
    pub sets_per_match: u32,
    /// Point cap per regular set.
    pub points_per_set: u32,
    /// Point cap for the deciding third set (best of three only).
    pub points_per_decider: u32,
    pub tiebreak: Tiebreak,
    /// Target pool size; the trailing pool may be smaller (byes).
    pub pool_size: usize,
    pub seeding: SeedingMethod,
    /// Courts available per round; surplus matches are left uncourted.
    pub courts: u32,
    /// Play a third-place match in bracket kinds where it is optional.
    pub third_place_match: bool,
    /// Fill referee slots from resting members / feeding losers.
    pub with_referees: bool,
    pub bracket: BracketKind,
}

impl Default for Format {
    fn default() -> Self {
        Self {
            sets_per_match: 3,
            points_per_set: 21,
            points_per_decider: 15,
            tiebreak: Tiebreak::default(),
            pool_size: 4,
            seeding: SeedingMethod::default(),
            courts: 4,
            third_place_match: true,
            with_referees: false,
            bracket: BracketKind::default(),
        }
    }
}

impl Format {
    /// Sets a side must take to win a match.
    pub fn sets_to_win(&self) -> u32 {
        match self.sets_per_match {
            3 => 2,
            n => n,
        }
    }

    /// Synthetic score for a walk-over, at the standard winning margin.
    /// `a_walks` says which side advances.
    pub fn walkover_sets(&self, a_walks: bool) -> Vec<SetScore> {
        let set = |cap: u32| {
            if a_walks {
                SetScore::new(cap, 0)
            } else {
                SetScore::new(0, cap)
            }
        };
        (0..self.sets_to_win())
            .map(|_| set(self.points_per_set))
            .collect()
    }
}

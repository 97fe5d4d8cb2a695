//! Knockout topology generators.
//!
//! Each topology produces a match skeleton (nodes plus dependency edges) in
//! a placeholder pass before the pool phase finishes, and a populate pass
//! that resolves pool-rank and qualifier slots against the final standings.

mod fixed_four;
mod general;
mod placement_tree;
mod shortened;

pub use fixed_four::FixedFourBracket;
pub use general::GeneralBracket;
pub use placement_tree::PlacementTreeBracket;
pub use shortened::ShortenedMainBracket;

use crate::models::{
    BracketKind, Match, MatchId, MatchStatus, Placement, Slot, Stage, StandingEntry,
    TournamentError,
};

/// Inputs a topology generator needs besides the standings.
#[derive(Clone, Debug)]
pub struct BracketContext {
    pub pool_count: usize,
    /// Drawn pool sizes, index-aligned with the groups.
    pub pool_sizes: Vec<usize>,
    /// First free global match number.
    pub next_number: u32,
    /// First knockout round (pool rounds come before).
    pub first_round: u32,
    pub third_place_match: bool,
    pub with_referees: bool,
}

/// A knockout topology: placeholder skeleton, populate pass, and the match
/// count it will produce.
pub trait BracketGenerator {
    fn kind(&self) -> BracketKind;

    /// Match skeleton with placeholder slots, before pool results exist.
    fn skeleton(&self, ctx: &BracketContext) -> Vec<Match>;

    /// Resolve placeholder slots against ranked per-pool standings and flip
    /// dependency-free matches to scheduled.
    fn populate(
        &self,
        matches: &mut [Match],
        pools: &[Vec<StandingEntry>],
    ) -> Result<(), TournamentError> {
        resolve_pool_ranks(matches, pools);
        Ok(())
    }

    fn expected_match_count(&self, ctx: &BracketContext) -> usize;
}

/// Select the generator for a bracket kind.
///
/// Panics on an unsupported pool count: that is caller misuse, not user
/// input, which `Tournament::start` already rejects as a value.
pub fn generator_for(kind: BracketKind, pool_count: usize) -> Box<dyn BracketGenerator> {
    match kind {
        BracketKind::FixedFour => {
            assert!(
                pool_count == 4,
                "fixed four-pool bracket requires exactly 4 pools, got {}",
                pool_count
            );
            Box::new(FixedFourBracket)
        }
        BracketKind::General => {
            assert!(
                (2..=8).contains(&pool_count),
                "general bracket requires 2-8 pools, got {}",
                pool_count
            );
            Box::new(GeneralBracket { pool_count })
        }
        BracketKind::PlacementTree => {
            assert!(pool_count >= 1, "placement tree requires at least one pool");
            Box::new(PlacementTreeBracket)
        }
        BracketKind::ShortenedMain => {
            assert!(
                pool_count == 4,
                "shortened main round requires exactly 4 pools, got {}",
                pool_count
            );
            Box::new(ShortenedMainBracket)
        }
    }
}

/// Default populate pass: bind pool-rank slots to the finisher, or to a bye
/// when the pool never produced that rank (undersized trailing pool).
pub(crate) fn resolve_pool_ranks(matches: &mut [Match], pools: &[Vec<StandingEntry>]) {
    for m in matches.iter_mut() {
        for slot in [&mut m.slot_a, &mut m.slot_b] {
            if let Slot::PoolRank { pool, rank } = *slot {
                *slot = match pools.get(pool).and_then(|p| p.get(rank - 1)) {
                    Some(entry) => Slot::Competitor {
                        id: entry.competitor,
                    },
                    None => Slot::Bye,
                };
            }
        }
        if m.status == MatchStatus::Pending && m.both_bound() {
            m.status = MatchStatus::Scheduled;
        }
    }
}

/// Threaded construction state: global match numbers and round counter are
/// explicit, so each round stays independently testable.
pub struct BracketBuilder {
    next_number: u32,
    round: u32,
    with_referees: bool,
    matches: Vec<Match>,
}

impl BracketBuilder {
    pub fn new(ctx: &BracketContext) -> Self {
        Self {
            next_number: ctx.next_number,
            round: ctx.first_round,
            with_referees: ctx.with_referees,
            matches: Vec::new(),
        }
    }

    pub fn next_round(&mut self) {
        self.round += 1;
    }

    pub fn push(&mut self, stage: Stage, slot_a: Slot, slot_b: Slot) -> MatchId {
        let mut m = Match::knockout(self.next_number, self.round, stage, slot_a, slot_b);
        self.next_number += 1;
        if self.with_referees {
            m.referee = self.referee_for(&m);
        }
        let id = m.id;
        self.matches.push(m);
        id
    }

    pub fn push_placed(
        &mut self,
        stage: Stage,
        slot_a: Slot,
        slot_b: Slot,
        placement: Placement,
    ) -> MatchId {
        let id = self.push(stage, slot_a, slot_b);
        if let Some(m) = self.matches.last_mut() {
            m.placement = Some(placement);
            if placement.is_terminal() {
                m.contested_rank = Some(placement.lo);
            }
        }
        id
    }

    /// Referee placeholder: the loser of the first feeding match.
    fn referee_for(&self, m: &Match) -> Option<String> {
        for slot in [&m.slot_a, &m.slot_b] {
            if let Slot::Dependency { source, .. } = slot {
                if let Some(feeder) = self.matches.iter().find(|x| x.id == *source) {
                    return Some(format!("Loser of match {}", feeder.number));
                }
            }
        }
        None
    }

    pub fn finish(self) -> Vec<Match> {
        self.matches
    }
}

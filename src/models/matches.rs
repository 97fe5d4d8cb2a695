//! Match, Slot, SetScore, Stage, and Placement for pool and knockout play.

use crate::models::competitor::CompetitorId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Required outcome of an upstream match a slot is waiting on.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Winner,
    Loser,
}

/// One side of a match. Each slot is in exactly one state, so a bound
/// competitor can never coexist with a pending reference.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Slot {
    /// Walk-over: no competitor will ever fill this slot.
    Bye,
    /// Bound competitor.
    Competitor { id: CompetitorId },
    /// Finisher of a pool (rank 1 = pool winner), resolved once the pool
    /// phase completes.
    PoolRank { pool: usize, rank: usize },
    /// Cross-pool seeded qualifier (pool winners plus best runners-up),
    /// resolved once the pool phase completes.
    Qualifier { seed: usize },
    /// Winner or loser of an earlier match.
    Dependency { source: MatchId, outcome: Outcome },
}

impl Slot {
    pub fn winner_of(source: MatchId) -> Self {
        Slot::Dependency {
            source,
            outcome: Outcome::Winner,
        }
    }

    pub fn loser_of(source: MatchId) -> Self {
        Slot::Dependency {
            source,
            outcome: Outcome::Loser,
        }
    }

    pub fn pool_rank(pool: usize, rank: usize) -> Self {
        Slot::PoolRank { pool, rank }
    }

    /// The bound competitor, if any.
    pub fn competitor(&self) -> Option<CompetitorId> {
        match self {
            Slot::Competitor { id } => Some(*id),
            _ => None,
        }
    }

    /// True bye: neither a bound competitor nor a pending reference.
    pub fn is_bye(&self) -> bool {
        matches!(self, Slot::Bye)
    }
}

/// Points of a single set, sides A and B.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SetScore {
    pub a: u32,
    pub b: u32,
}

impl SetScore {
    pub fn new(a: u32, b: u32) -> Self {
        Self { a, b }
    }
}

/// Lifecycle of a match.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Created by a topology generator; at least one slot unresolved.
    #[default]
    Pending,
    /// Both slots bound; playable.
    Scheduled,
    InProgress,
    Completed,
}

/// Knockout stage tag, for display grouping.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// 2nd/3rd place cross round feeding the quarterfinals.
    Intermediate,
    /// Qualification round of the shortened main round format.
    Qualification,
    QuarterFinal,
    SemiFinal,
    ThirdPlace,
    Final,
    /// Placement match outside the main line; labelled by its interval.
    Placement,
}

/// Range of final ranks a bracket subtree can still produce.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub lo: u32,
    pub hi: u32,
}

impl Placement {
    pub fn new(lo: u32, hi: u32) -> Self {
        Self { lo, hi }
    }

    pub fn size(&self) -> u32 {
        self.hi - self.lo + 1
    }

    /// Top half: the interval the winner stays in.
    pub fn winner_half(&self) -> Placement {
        let mid = self.lo + self.size() / 2 - 1;
        Placement::new(self.lo, mid)
    }

    /// Bottom half: the interval the loser drops into.
    pub fn loser_half(&self) -> Placement {
        let mid = self.lo + self.size() / 2 - 1;
        Placement::new(mid + 1, self.hi)
    }

    /// A size-2 interval is decided by a single match.
    pub fn is_terminal(&self) -> bool {
        self.size() == 2
    }

    /// Human-readable placement string: "1." or "13.-16.".
    pub fn label(&self) -> String {
        if self.lo == self.hi {
            format!("{}.", self.lo)
        } else {
            format!("{}.-{}.", self.lo, self.hi)
        }
    }
}

/// A single match between two slots.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    /// Round number, global across the tournament (knockout rounds continue
    /// after the pool rounds).
    pub round: u32,
    /// Global sequence number, 1-based.
    pub number: u32,
    pub slot_a: Slot,
    pub slot_b: Slot,
    /// Court assignment, if one was available this round.
    pub court: Option<u32>,
    pub sets: Vec<SetScore>,
    /// None until decided.
    pub winner: Option<CompetitorId>,
    pub status: MatchStatus,
    /// Pool index for pool-phase matches.
    pub pool: Option<usize>,
    pub stage: Option<Stage>,
    /// Range of final ranks this match can still produce.
    pub placement: Option<Placement>,
    /// For terminal matches: the exact rank the winner takes (loser takes
    /// rank + 1).
    pub contested_rank: Option<u32>,
    /// Referee slot, as display text (resting pool member, feeding loser).
    pub referee: Option<String>,
}

impl Match {
    /// A pool-phase match between two bound competitors; scheduled from the
    /// start.
    pub fn pool_match(
        number: u32,
        round: u32,
        pool: usize,
        a: CompetitorId,
        b: CompetitorId,
        court: Option<u32>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            number,
            slot_a: Slot::Competitor { id: a },
            slot_b: Slot::Competitor { id: b },
            court,
            sets: Vec::new(),
            winner: None,
            status: MatchStatus::Scheduled,
            pool: Some(pool),
            stage: None,
            placement: None,
            contested_rank: None,
            referee: None,
        }
    }

    /// A knockout match skeleton; pending until both slots are bound.
    pub fn knockout(number: u32, round: u32, stage: Stage, slot_a: Slot, slot_b: Slot) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            number,
            slot_a,
            slot_b,
            court: None,
            sets: Vec::new(),
            winner: None,
            status: MatchStatus::Pending,
            pool: None,
            stage: Some(stage),
            placement: None,
            contested_rank: None,
            referee: None,
        }
    }

    pub fn both_bound(&self) -> bool {
        self.slot_a.competitor().is_some() && self.slot_b.competitor().is_some()
    }

    /// The bound slot that is not the winner. None while undecided, or when
    /// the match was a walk-over.
    pub fn loser(&self) -> Option<CompetitorId> {
        let winner = self.winner?;
        [&self.slot_a, &self.slot_b]
            .into_iter()
            .filter_map(Slot::competitor)
            .find(|&id| id != winner)
    }

    /// Whether either slot waits on the given match.
    pub fn depends_on(&self, source: MatchId) -> bool {
        let waits = |s: &Slot| matches!(s, Slot::Dependency { source: d, .. } if *d == source);
        waits(&self.slot_a) || waits(&self.slot_b)
    }

    /// Human-readable stage label ("Semi-final", "Placement 9.-12.").
    pub fn stage_label(&self) -> Option<String> {
        let stage = self.stage?;
        Some(match stage {
            Stage::Intermediate => "Intermediate round".to_string(),
            Stage::Qualification => "Qualification".to_string(),
            Stage::QuarterFinal => "Quarter-final".to_string(),
            Stage::SemiFinal => "Semi-final".to_string(),
            Stage::ThirdPlace => "Third-place match".to_string(),
            Stage::Final => "Final".to_string(),
            Stage::Placement => match self.placement {
                Some(p) => format!("Placement {}", p.label()),
                None => "Placement".to_string(),
            },
        })
    }
}

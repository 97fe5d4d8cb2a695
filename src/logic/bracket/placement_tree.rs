//! Full placement tree: every rank 1..N is resolved by repeatedly halving
//! placement intervals until each is decided by a terminal match.

use super::{BracketBuilder, BracketContext, BracketGenerator};
use crate::models::{BracketKind, Match, MatchId, Outcome, Placement, Slot, Stage};

pub struct PlacementTreeBracket;

type Feeder = (MatchId, Outcome);

impl BracketGenerator for PlacementTreeBracket {
    fn kind(&self) -> BracketKind {
        BracketKind::PlacementTree
    }

    /// Seed order is pool rank first, pool index second. Round 1 pairs seed
    /// i against seed P+1-i over the field padded to the next power of two;
    /// seeds past the real field are byes. Each match declares the top half
    /// of its input interval for the winner and the bottom half for the
    /// loser; feeders with an identical declared interval form the next
    /// round's groups, pairing the first by bracket position against the
    /// last. A size-2 interval is terminal and fixes two exact ranks.
    fn skeleton(&self, ctx: &BracketContext) -> Vec<Match> {
        let mut seeds = seed_slots(&ctx.pool_sizes);
        let n = seeds.len();
        if n < 2 {
            return Vec::new();
        }
        let p = n.next_power_of_two();
        seeds.resize(p, Slot::Bye);

        let mut b = BracketBuilder::new(ctx);
        let full = Placement::new(1, p as u32);

        let mut groups: Vec<(Placement, Vec<Feeder>)> = Vec::new();
        for j in 0..p / 2 {
            let id = b.push_placed(
                stage_for(full),
                seeds[j].clone(),
                seeds[p - 1 - j].clone(),
                full,
            );
            if !full.is_terminal() {
                add_feeder(&mut groups, full.winner_half(), (id, Outcome::Winner));
                add_feeder(&mut groups, full.loser_half(), (id, Outcome::Loser));
            }
        }

        while !groups.is_empty() {
            b.next_round();
            let mut next: Vec<(Placement, Vec<Feeder>)> = Vec::new();
            for (interval, feeders) in groups {
                for i in 0..feeders.len() / 2 {
                    let (src_a, out_a) = feeders[i];
                    let (src_b, out_b) = feeders[feeders.len() - 1 - i];
                    let id = b.push_placed(
                        stage_for(interval),
                        Slot::Dependency {
                            source: src_a,
                            outcome: out_a,
                        },
                        Slot::Dependency {
                            source: src_b,
                            outcome: out_b,
                        },
                        interval,
                    );
                    if !interval.is_terminal() {
                        add_feeder(&mut next, interval.winner_half(), (id, Outcome::Winner));
                        add_feeder(&mut next, interval.loser_half(), (id, Outcome::Loser));
                    }
                }
            }
            groups = next;
        }

        b.finish()
    }

    fn expected_match_count(&self, ctx: &BracketContext) -> usize {
        let n: usize = ctx.pool_sizes.iter().sum();
        if n < 2 {
            return 0;
        }
        let p = n.next_power_of_two();
        // P/2 matches in each of the log2(P) rounds.
        p / 2 * p.trailing_zeros() as usize
    }
}

/// Placeholder slots in seed order: all pool winners by pool index, then
/// all runners-up, and so on; ranks a pool never produced are skipped.
fn seed_slots(pool_sizes: &[usize]) -> Vec<Slot> {
    let max_size = pool_sizes.iter().copied().max().unwrap_or(0);
    let mut seeds = Vec::new();
    for rank in 1..=max_size {
        for (pool, &size) in pool_sizes.iter().enumerate() {
            if rank <= size {
                seeds.push(Slot::pool_rank(pool, rank));
            }
        }
    }
    seeds
}

fn add_feeder(groups: &mut Vec<(Placement, Vec<Feeder>)>, interval: Placement, feeder: Feeder) {
    if let Some((_, feeders)) = groups.iter_mut().find(|(iv, _)| *iv == interval) {
        feeders.push(feeder);
    } else {
        groups.push((interval, vec![feeder]));
    }
}

fn stage_for(interval: Placement) -> Stage {
    match (interval.lo, interval.hi) {
        (1, 2) => Stage::Final,
        (3, 4) => Stage::ThirdPlace,
        (1, 4) => Stage::SemiFinal,
        (1, 8) => Stage::QuarterFinal,
        _ => Stage::Placement,
    }
}

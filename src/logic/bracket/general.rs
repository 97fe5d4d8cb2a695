//! Generalized 2-8 pool knockout: pool winners plus enough best-ranked
//! runners-up fill an 8-slot bracket seeded 1v8..4v5; 2- and 3-pool fields
//! use dedicated pairings instead.

use super::{resolve_pool_ranks, BracketBuilder, BracketContext, BracketGenerator};
use crate::models::{
    BracketKind, CompetitorId, Match, MatchId, MatchStatus, Placement, Slot, Stage,
    StandingEntry, TournamentError,
};

pub struct GeneralBracket {
    pub pool_count: usize,
}

impl BracketGenerator for GeneralBracket {
    fn kind(&self) -> BracketKind {
        BracketKind::General
    }

    fn skeleton(&self, ctx: &BracketContext) -> Vec<Match> {
        let mut b = BracketBuilder::new(ctx);
        match self.pool_count {
            2 => {
                // Crossed semifinals.
                let sf1 = b.push(Stage::SemiFinal, Slot::pool_rank(0, 1), Slot::pool_rank(1, 2));
                let sf2 = b.push(Stage::SemiFinal, Slot::pool_rank(1, 1), Slot::pool_rank(0, 2));
                push_final_round(&mut b, ctx, sf1, sf2);
            }
            3 => {
                // Three winners plus the best runner-up.
                let sf1 = b.push(
                    Stage::SemiFinal,
                    Slot::pool_rank(0, 1),
                    Slot::Qualifier { seed: 4 },
                );
                let sf2 = b.push(Stage::SemiFinal, Slot::pool_rank(1, 1), Slot::pool_rank(2, 1));
                push_final_round(&mut b, ctx, sf1, sf2);
            }
            _ => {
                // 8 qualifiers: winners first, then best runners-up.
                let qf: Vec<_> = [(1, 8), (2, 7), (3, 6), (4, 5)]
                    .into_iter()
                    .map(|(hi, lo)| {
                        b.push(
                            Stage::QuarterFinal,
                            Slot::Qualifier { seed: hi },
                            Slot::Qualifier { seed: lo },
                        )
                    })
                    .collect();
                b.next_round();
                let sf1 = b.push(Stage::SemiFinal, Slot::winner_of(qf[0]), Slot::winner_of(qf[3]));
                let sf2 = b.push(Stage::SemiFinal, Slot::winner_of(qf[1]), Slot::winner_of(qf[2]));
                push_final_round(&mut b, ctx, sf1, sf2);
            }
        }
        b.finish()
    }

    fn populate(
        &self,
        matches: &mut [Match],
        pools: &[Vec<StandingEntry>],
    ) -> Result<(), TournamentError> {
        let seeds = qualifier_seeds(pools, self.pool_count)?;
        for m in matches.iter_mut() {
            for slot in [&mut m.slot_a, &mut m.slot_b] {
                if let Slot::Qualifier { seed } = *slot {
                    *slot = match seeds.get(seed - 1).copied().flatten() {
                        Some(id) => Slot::Competitor { id },
                        None => Slot::Bye,
                    };
                }
            }
        }
        resolve_pool_ranks(matches, pools);
        for m in matches.iter_mut() {
            if m.status == MatchStatus::Pending && m.both_bound() {
                m.status = MatchStatus::Scheduled;
            }
        }
        Ok(())
    }

    fn expected_match_count(&self, ctx: &BracketContext) -> usize {
        let third = usize::from(ctx.third_place_match);
        match self.pool_count {
            2 | 3 => 3 + third,
            _ => 7 + third,
        }
    }
}

fn push_final_round(b: &mut BracketBuilder, ctx: &BracketContext, sf1: MatchId, sf2: MatchId) {
    b.next_round();
    if ctx.third_place_match {
        b.push_placed(
            Stage::ThirdPlace,
            Slot::loser_of(sf1),
            Slot::loser_of(sf2),
            Placement::new(3, 4),
        );
    }
    b.push_placed(
        Stage::Final,
        Slot::winner_of(sf1),
        Slot::winner_of(sf2),
        Placement::new(1, 2),
    );
}

/// Qualifier seed order: pool winners by points then point differential,
/// then enough best runners-up by the same key. A missing seed (short field)
/// becomes a bye.
///
/// There is deliberately no further tiebreak: when the runner-up cut ties on
/// both points and point differential, the tie is reported as unresolved
/// rather than invented away.
fn qualifier_seeds(
    pools: &[Vec<StandingEntry>],
    pool_count: usize,
) -> Result<Vec<Option<CompetitorId>>, TournamentError> {
    let slots: usize = if pool_count == 3 { 4 } else { 8 };

    let mut winners: Vec<&StandingEntry> = pools.iter().filter_map(|p| p.first()).collect();
    winners.sort_by(|x, y| {
        y.points
            .cmp(&x.points)
            .then_with(|| y.point_diff().cmp(&x.point_diff()))
    });

    let mut runners: Vec<&StandingEntry> = pools.iter().filter_map(|p| p.get(1)).collect();
    runners.sort_by(|x, y| {
        y.points
            .cmp(&x.points)
            .then_with(|| y.point_diff().cmp(&x.point_diff()))
    });

    let needed = slots.saturating_sub(winners.len());
    if runners.len() > needed && needed > 0 {
        let last_in = runners[needed - 1];
        let first_out = runners[needed];
        if last_in.points == first_out.points && last_in.point_diff() == first_out.point_diff() {
            return Err(TournamentError::UnresolvedQualifierTie {
                a: last_in.competitor,
                b: first_out.competitor,
            });
        }
    }

    let mut seeds: Vec<Option<CompetitorId>> = winners
        .iter()
        .chain(runners.iter().take(needed))
        .map(|e| Some(e.competitor))
        .collect();
    seeds.resize(slots, None);
    Ok(seeds)
}

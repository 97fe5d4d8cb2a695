//! Fixed 4-pool knockout: winners bye to the quarterfinals, 2nd/3rd play an
//! intermediate round, 4th places are eliminated.

use super::{BracketBuilder, BracketContext, BracketGenerator};
use crate::models::{BracketKind, Match, Placement, Slot, Stage};

pub struct FixedFourBracket;

impl BracketGenerator for FixedFourBracket {
    fn kind(&self) -> BracketKind {
        BracketKind::FixedFour
    }

    fn skeleton(&self, ctx: &BracketContext) -> Vec<Match> {
        let mut b = BracketBuilder::new(ctx);

        // Intermediate round: each 2nd seed faces the 3rd seed of the pool
        // at the opposite end of the seeding order.
        let inter: Vec<_> = (0..4)
            .map(|p| {
                b.push(
                    Stage::Intermediate,
                    Slot::pool_rank(p, 2),
                    Slot::pool_rank(3 - p, 3),
                )
            })
            .collect();

        // Quarterfinals: a pool winner never meets its own pool's qualifier.
        b.next_round();
        let qf_pairs = [(0, 1), (1, 0), (2, 3), (3, 2)];
        let qf: Vec<_> = qf_pairs
            .into_iter()
            .map(|(pool, feeder)| {
                b.push(
                    Stage::QuarterFinal,
                    Slot::pool_rank(pool, 1),
                    Slot::winner_of(inter[feeder]),
                )
            })
            .collect();

        b.next_round();
        let sf1 = b.push(Stage::SemiFinal, Slot::winner_of(qf[0]), Slot::winner_of(qf[1]));
        let sf2 = b.push(Stage::SemiFinal, Slot::winner_of(qf[2]), Slot::winner_of(qf[3]));

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

        b.finish()
    }

    fn expected_match_count(&self, ctx: &BracketContext) -> usize {
        // 4 intermediate + 4 quarterfinals + 2 semifinals + final
        11 + usize::from(ctx.third_place_match)
    }
}

//! Shortened main round for 4 pools: pool winners bye to the quarterfinals,
//! 2nd/3rd play a qualification round whose losers feed a 9-12 bracket, 4th
//! places play an independent 13-16 bracket. Each of the 1-8, 9-12 and
//! 13-16 brackets is carried to its own final, so every rank is resolved.

use super::{BracketBuilder, BracketContext, BracketGenerator};
use crate::models::{BracketKind, Match, Placement, Slot, Stage};

pub struct ShortenedMainBracket;

impl BracketGenerator for ShortenedMainBracket {
    fn kind(&self) -> BracketKind {
        BracketKind::ShortenedMain
    }

    fn skeleton(&self, ctx: &BracketContext) -> Vec<Match> {
        let mut b = BracketBuilder::new(ctx);

        // Qualification: each 2nd seed faces the 3rd seed of the pool at the
        // opposite end of the seeding order. Winners advance to the
        // quarterfinals, losers drop to the 9-12 bracket.
        let qual: Vec<_> = (0..4)
            .map(|p| {
                b.push(
                    Stage::Qualification,
                    Slot::pool_rank(p, 2),
                    Slot::pool_rank(3 - p, 3),
                )
            })
            .collect();
        // 13-16 bracket: the 4th-place finishers, independent of the rest.
        let p1316 = Placement::new(13, 16);
        let r13a = b.push_placed(
            Stage::Placement,
            Slot::pool_rank(0, 4),
            Slot::pool_rank(3, 4),
            p1316,
        );
        let r13b = b.push_placed(
            Stage::Placement,
            Slot::pool_rank(1, 4),
            Slot::pool_rank(2, 4),
            p1316,
        );

        b.next_round();
        // Quarterfinals: a pool winner never meets its own pool's qualifier.
        let qf: Vec<_> = [(0, 1), (1, 0), (2, 3), (3, 2)]
            .into_iter()
            .map(|(pool, feeder)| {
                b.push_placed(
                    Stage::QuarterFinal,
                    Slot::pool_rank(pool, 1),
                    Slot::winner_of(qual[feeder]),
                    Placement::new(1, 8),
                )
            })
            .collect();
        let p912 = Placement::new(9, 12);
        let s9a = b.push_placed(
            Stage::Placement,
            Slot::loser_of(qual[0]),
            Slot::loser_of(qual[3]),
            p912,
        );
        let s9b = b.push_placed(
            Stage::Placement,
            Slot::loser_of(qual[1]),
            Slot::loser_of(qual[2]),
            p912,
        );
        b.push_placed(
            Stage::Placement,
            Slot::winner_of(r13a),
            Slot::winner_of(r13b),
            Placement::new(13, 14),
        );
        b.push_placed(
            Stage::Placement,
            Slot::loser_of(r13a),
            Slot::loser_of(r13b),
            Placement::new(15, 16),
        );

        b.next_round();
        let sf1 = b.push_placed(
            Stage::SemiFinal,
            Slot::winner_of(qf[0]),
            Slot::winner_of(qf[1]),
            Placement::new(1, 4),
        );
        let sf2 = b.push_placed(
            Stage::SemiFinal,
            Slot::winner_of(qf[2]),
            Slot::winner_of(qf[3]),
            Placement::new(1, 4),
        );
        let p58 = Placement::new(5, 8);
        let s5a = b.push_placed(Stage::Placement, Slot::loser_of(qf[0]), Slot::loser_of(qf[3]), p58);
        let s5b = b.push_placed(Stage::Placement, Slot::loser_of(qf[1]), Slot::loser_of(qf[2]), p58);
        b.push_placed(
            Stage::Placement,
            Slot::winner_of(s9a),
            Slot::winner_of(s9b),
            Placement::new(9, 10),
        );
        b.push_placed(
            Stage::Placement,
            Slot::loser_of(s9a),
            Slot::loser_of(s9b),
            Placement::new(11, 12),
        );

        b.next_round();
        // Full placements need the third-place match regardless of the flag.
        b.push_placed(
            Stage::ThirdPlace,
            Slot::loser_of(sf1),
            Slot::loser_of(sf2),
            Placement::new(3, 4),
        );
        b.push_placed(
            Stage::Final,
            Slot::winner_of(sf1),
            Slot::winner_of(sf2),
            Placement::new(1, 2),
        );
        b.push_placed(
            Stage::Placement,
            Slot::winner_of(s5a),
            Slot::winner_of(s5b),
            Placement::new(5, 6),
        );
        b.push_placed(
            Stage::Placement,
            Slot::loser_of(s5a),
            Slot::loser_of(s5b),
            Placement::new(7, 8),
        );

        b.finish()
    }

    fn expected_match_count(&self, _ctx: &BracketContext) -> usize {
        // 4 qualification + 2 + QF 4 + 2 + 2 + SF 2 + 2 + 2 + final round 4
        24
    }
}

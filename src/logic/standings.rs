//! Per-pool standings with a configurable two-level tiebreak.

use crate::models::{CompetitorId, Format, Group, Match, MatchStatus, StandingEntry, Tiebreak};
use std::cmp::Ordering;

/// Compute ranked standings for one pool from the completed pool matches.
///
/// The "points" ranking figure is matches won, except under the 2-set
/// format where it is sets won. The sort is points desc, then the
/// configured head-to-head / point-differential order, then set
/// differential, then in-pool seeding order, so ranks 1..k are always a
/// total order with no unresolved ties. Missing ids or matches never fail;
/// standings stay computable from whatever subset is completed.
pub fn pool_standings(
    pool: usize,
    group: &Group,
    matches: &[Match],
    format: &Format,
) -> Vec<StandingEntry> {
    let mut table: Vec<StandingEntry> = group
        .members
        .iter()
        .map(|&id| StandingEntry::new(id))
        .collect();

    let pool_matches: Vec<&Match> = matches
        .iter()
        .filter(|m| m.pool == Some(pool) && m.status == MatchStatus::Completed)
        .collect();

    for m in &pool_matches {
        let (Some(a), Some(b)) = (m.slot_a.competitor(), m.slot_b.competitor()) else {
            continue;
        };
        let Some(winner) = m.winner else {
            continue;
        };
        accumulate(&mut table, a, winner, m, false);
        accumulate(&mut table, b, winner, m, true);
    }

    for entry in &mut table {
        entry.points = if format.sets_per_match == 2 {
            entry.sets_won
        } else {
            entry.won
        };
    }

    // Final fallback on seeding order keeps the sort a total order even
    // when every other criterion ties.
    let seed_pos = |id: CompetitorId| group.members.iter().position(|&m| m == id).unwrap_or(usize::MAX);
    let mut sorted = table;
    sorted.sort_by(|x, y| {
        y.points
            .cmp(&x.points)
            .then_with(|| tiebreak_cmp(x, y, &pool_matches, format.tiebreak))
            .then_with(|| y.set_diff().cmp(&x.set_diff()))
            .then_with(|| seed_pos(x.competitor).cmp(&seed_pos(y.competitor)))
    });
    for (i, entry) in sorted.iter_mut().enumerate() {
        entry.rank = (i + 1) as u32;
    }
    sorted
}

fn tiebreak_cmp(
    x: &StandingEntry,
    y: &StandingEntry,
    pool_matches: &[&Match],
    order: Tiebreak,
) -> Ordering {
    let diff = y.point_diff().cmp(&x.point_diff());
    let h2h = head_to_head(x.competitor, y.competitor, pool_matches);
    match order {
        Tiebreak::HeadToHeadFirst => h2h.then(diff),
        Tiebreak::PointDiffFirst => diff.then(h2h),
    }
}

/// Direct result between a tied pair: the single completed pool match
/// between them, if any. Absent a match the pair stays tied.
fn head_to_head(x: CompetitorId, y: CompetitorId, pool_matches: &[&Match]) -> Ordering {
    let direct = pool_matches.iter().find(|m| {
        let pair = (m.slot_a.competitor(), m.slot_b.competitor());
        pair == (Some(x), Some(y)) || pair == (Some(y), Some(x))
    });
    match direct.and_then(|m| m.winner) {
        Some(w) if w == x => Ordering::Less,
        Some(w) if w == y => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// Fold one completed match into a competitor's row. `mirrored` reads the
/// set scores from side B's perspective.
fn accumulate(table: &mut [StandingEntry], me: CompetitorId, winner: CompetitorId, m: &Match, mirrored: bool) {
    let Some(entry) = table.iter_mut().find(|e| e.competitor == me) else {
        return;
    };
    entry.played += 1;
    if winner == me {
        entry.won += 1;
    } else {
        entry.lost += 1;
    }
    for set in &m.sets {
        let (mine, theirs) = if mirrored { (set.b, set.a) } else { (set.a, set.b) };
        entry.points_won += mine;
        entry.points_lost += theirs;
        if mine > theirs {
            entry.sets_won += 1;
        } else if theirs > mine {
            entry.sets_lost += 1;
        }
    }
}

//! Result propagation and walk-over resolution.

use crate::models::{CompetitorId, Format, Match, MatchId, MatchStatus, Outcome, Slot};
use std::collections::VecDeque;

/// Advance the completed match's winner and loser into every match that
/// depends on it.
///
/// The loser of a walk-over does not exist, so loser-dependent slots become
/// byes. A match whose slots are now both bound flips from pending to
/// scheduled. Idempotent: re-running for the same id finds no remaining
/// dependency slots and changes nothing. Unknown or undecided ids no-op.
pub fn propagate_result(matches: &mut [Match], source: MatchId) {
    let Some(src) = matches.iter().find(|m| m.id == source) else {
        return;
    };
    if src.status != MatchStatus::Completed {
        return;
    }
    let winner = src.winner;
    let loser = src.loser();

    for m in matches.iter_mut() {
        if m.id == source || m.status == MatchStatus::Completed {
            continue;
        }
        bind_slot(&mut m.slot_a, source, winner, loser);
        bind_slot(&mut m.slot_b, source, winner, loser);
        if m.status == MatchStatus::Pending && m.both_bound() {
            m.status = MatchStatus::Scheduled;
        }
    }
}

fn bind_slot(
    slot: &mut Slot,
    source: MatchId,
    winner: Option<CompetitorId>,
    loser: Option<CompetitorId>,
) {
    let Slot::Dependency { source: dep, outcome } = slot else {
        return;
    };
    if *dep != source {
        return;
    }
    let advanced = match outcome {
        Outcome::Winner => winner,
        Outcome::Loser => loser,
    };
    *slot = match advanced {
        Some(id) => Slot::Competitor { id },
        None => Slot::Bye,
    };
}

/// Ids of all matches with a slot depending on `source`.
pub fn dependents_of(matches: &[Match], source: MatchId) -> Vec<MatchId> {
    matches
        .iter()
        .filter(|m| m.depends_on(source))
        .map(|m| m.id)
        .collect()
}

/// Resolve walk-overs to a fixed point over the given worklist of match ids.
///
/// A non-completed match with exactly one bye slot and one bound opponent
/// auto-completes with the opponent as winner and a synthetic score at the
/// format's standard winning margin, then propagates exactly like a manual
/// result, so byes cascade. A match with two bye slots is a dead branch: it
/// never auto-completes and its dependents stay unresolved, but it is
/// dropped from the worklist so siblings keep resolving. Each match can
/// complete at most once, which bounds the iteration by the bracket depth.
pub fn resolve_byes(
    matches: &mut Vec<Match>,
    format: &Format,
    seeds: impl IntoIterator<Item = MatchId>,
) {
    let mut queue: VecDeque<MatchId> = seeds.into_iter().collect();
    while let Some(id) = queue.pop_front() {
        let Some(idx) = matches.iter().position(|m| m.id == id) else {
            continue;
        };
        if matches[idx].status == MatchStatus::Completed {
            continue;
        }
        let a_bye = matches[idx].slot_a.is_bye();
        let b_bye = matches[idx].slot_b.is_bye();
        if a_bye == b_bye {
            // Either nothing to do, or a dead branch (two byes).
            continue;
        }
        let walker = if a_bye {
            matches[idx].slot_b.competitor()
        } else {
            matches[idx].slot_a.competitor()
        };
        // The opponent slot may still hold a pending reference; revisit when
        // it binds.
        let Some(winner) = walker else {
            continue;
        };

        matches[idx].winner = Some(winner);
        matches[idx].sets = format.walkover_sets(!a_bye);
        matches[idx].status = MatchStatus::Completed;

        queue.extend(dependents_of(matches, id));
        propagate_result(matches, id);
    }
}

/// Run walk-over resolution over every non-completed match.
pub fn resolve_all_byes(matches: &mut Vec<Match>, format: &Format) {
    let seeds: Vec<MatchId> = matches
        .iter()
        .filter(|m| m.status != MatchStatus::Completed)
        .map(|m| m.id)
        .collect();
    resolve_byes(matches, format, seeds);
}

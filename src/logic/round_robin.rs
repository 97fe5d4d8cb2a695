//! Round-robin scheduling via the circle method.

use crate::models::{Competitor, CompetitorId, Format, Group, Match};

/// One round of a pool's round-robin: pairings plus the member resting
/// because of the synthetic bye (odd pool sizes only).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RobinRound {
    pub pairs: Vec<(CompetitorId, CompetitorId)>,
    pub resting: Option<CompetitorId>,
}

/// Generate all round-robin pairings for one pool with the circle method:
/// fix the first member, rotate the rest each round; odd counts are padded
/// with a synthetic bye whose pairings are dropped, not emitted.
///
/// Guarantees: every unordered real pair occurs exactly once; every member
/// appears at most once per round; rounds = padded count - 1.
pub fn circle_rounds(members: &[CompetitorId]) -> Vec<RobinRound> {
    if members.len() < 2 {
        return Vec::new();
    }
    let mut ring: Vec<Option<CompetitorId>> = members.iter().copied().map(Some).collect();
    if ring.len() % 2 == 1 {
        ring.push(None);
    }
    let m = ring.len();

    let mut rounds = Vec::with_capacity(m - 1);
    for _ in 0..m - 1 {
        let mut pairs = Vec::with_capacity(m / 2);
        let mut resting = None;
        for i in 0..m / 2 {
            match (ring[i], ring[m - 1 - i]) {
                (Some(a), Some(b)) => pairs.push((a, b)),
                (Some(a), None) | (None, Some(a)) => resting = Some(a),
                (None, None) => {}
            }
        }
        rounds.push(RobinRound { pairs, resting });
        // Keep ring[0] fixed, rotate the rest one step.
        if let Some(last) = ring.pop() {
            ring.insert(1, last);
        }
    }
    rounds
}

/// Build all pool-phase matches, rounds aligned across pools.
///
/// Court numbers cycle 1..=courts within a round; matches beyond the
/// available courts get none rather than reusing one. Match numbers are a
/// global sequence starting at `start_number`. With referees enabled, the
/// pool's resting member that round referees its matches.
pub fn schedule_pool_phase(
    groups: &[Group],
    format: &Format,
    competitors: &[Competitor],
    start_number: u32,
) -> Vec<Match> {
    let per_pool: Vec<Vec<RobinRound>> = groups.iter().map(|g| circle_rounds(&g.members)).collect();
    let total_rounds = per_pool.iter().map(Vec::len).max().unwrap_or(0);

    let name_of = |id: CompetitorId| {
        competitors
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
    };

    let mut matches = Vec::new();
    let mut number = start_number;
    for round in 0..total_rounds {
        let mut courts_used = 0;
        for (pool, rounds) in per_pool.iter().enumerate() {
            let Some(robin) = rounds.get(round) else {
                continue;
            };
            let referee = if format.with_referees {
                robin.resting.and_then(name_of)
            } else {
                None
            };
            for &(a, b) in &robin.pairs {
                let court = if courts_used < format.courts {
                    courts_used += 1;
                    Some(courts_used)
                } else {
                    None
                };
                let mut m = Match::pool_match(number, (round + 1) as u32, pool, a, b, court);
                m.referee = referee.clone();
                matches.push(m);
                number += 1;
            }
        }
    }
    matches
}

/// Pool-phase match count: sum of k(k-1)/2 over the pools.
pub fn pool_phase_match_count(groups: &[Group]) -> usize {
    groups
        .iter()
        .map(|g| g.members.len() * g.members.len().saturating_sub(1) / 2)
        .sum()
}

//! Integration tests for the circle-method round-robin scheduler.

use racket_tournament_web::{
    circle_rounds, pool_phase_match_count, schedule_pool_phase, Competitor, CompetitorId, Format,
    Group,
};
use std::collections::HashSet;

fn ids(n: usize) -> Vec<CompetitorId> {
    (0..n).map(|_| uuid::Uuid::new_v4()).collect()
}

#[test]
fn every_pair_exactly_once() {
    for n in 2..=9 {
        let members = ids(n);
        let rounds = circle_rounds(&members);
        let mut seen: HashSet<(CompetitorId, CompetitorId)> = HashSet::new();
        for round in &rounds {
            for &(a, b) in &round.pairs {
                let key = if a < b { (a, b) } else { (b, a) };
                assert!(seen.insert(key), "pair repeated with {} members", n);
            }
        }
        assert_eq!(seen.len(), n * (n - 1) / 2, "pair count with {} members", n);
    }
}

#[test]
fn nobody_plays_twice_in_a_round() {
    let members = ids(7);
    for round in circle_rounds(&members) {
        let mut in_round: HashSet<CompetitorId> = HashSet::new();
        for &(a, b) in &round.pairs {
            assert!(in_round.insert(a));
            assert!(in_round.insert(b));
        }
        if let Some(resting) = round.resting {
            assert!(!in_round.contains(&resting));
        }
    }
}

#[test]
fn even_pool_has_no_resting_member() {
    let members = ids(6);
    let rounds = circle_rounds(&members);
    assert_eq!(rounds.len(), 5);
    assert!(rounds.iter().all(|r| r.resting.is_none()));
    assert!(rounds.iter().all(|r| r.pairs.len() == 3));
}

#[test]
fn odd_pool_rests_everyone_exactly_once() {
    let members = ids(5);
    let rounds = circle_rounds(&members);
    assert_eq!(rounds.len(), 5);
    let resting: Vec<CompetitorId> = rounds.iter().filter_map(|r| r.resting).collect();
    assert_eq!(resting.len(), 5);
    let unique: HashSet<_> = resting.iter().collect();
    assert_eq!(unique.len(), 5);
}

#[test]
fn degenerate_pools_produce_no_rounds() {
    assert!(circle_rounds(&ids(0)).is_empty());
    assert!(circle_rounds(&ids(1)).is_empty());
}

#[test]
fn schedule_aligns_rounds_and_cycles_courts() {
    let field: Vec<Competitor> = (0..8)
        .map(|i| Competitor::new(format!("P{}", i + 1), i as u32 + 1))
        .collect();
    let groups = vec![
        Group::new("Group A", field[..4].iter().map(|c| c.id).collect()),
        Group::new("Group B", field[4..].iter().map(|c| c.id).collect()),
    ];
    let format = Format {
        courts: 3,
        ..Format::default()
    };

    let matches = schedule_pool_phase(&groups, &format, &field, 1);
    assert_eq!(matches.len(), 12);
    assert_eq!(pool_phase_match_count(&groups), 12);

    // Global numbering starts at 1 with no gaps.
    let numbers: Vec<u32> = matches.iter().map(|m| m.number).collect();
    assert_eq!(numbers, (1..=12).collect::<Vec<u32>>());

    // 4 matches per round, but only 3 courts: the surplus match gets none.
    for round in 1..=3u32 {
        let in_round: Vec<_> = matches.iter().filter(|m| m.round == round).collect();
        assert_eq!(in_round.len(), 4);
        let courts: Vec<Option<u32>> = in_round.iter().map(|m| m.court).collect();
        assert_eq!(courts, vec![Some(1), Some(2), Some(3), None]);
    }
}

#[test]
fn referees_come_from_the_resting_member() {
    let field: Vec<Competitor> = (0..3)
        .map(|i| Competitor::new(format!("P{}", i + 1), i as u32 + 1))
        .collect();
    let groups = vec![Group::new("Group A", field.iter().map(|c| c.id).collect())];
    let format = Format {
        with_referees: true,
        ..Format::default()
    };

    let matches = schedule_pool_phase(&groups, &format, &field, 1);
    assert_eq!(matches.len(), 3);
    for m in &matches {
        let referee = m.referee.as_deref().unwrap();
        let playing: Vec<&str> = field
            .iter()
            .filter(|c| {
                Some(c.id) == m.slot_a.competitor() || Some(c.id) == m.slot_b.competitor()
            })
            .map(|c| c.name.as_str())
            .collect();
        assert!(!playing.contains(&referee));
    }
}

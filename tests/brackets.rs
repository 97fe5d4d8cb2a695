//! Integration tests for the fixed-four, general, and shortened-main
//! knockout topologies, driven through the full tournament lifecycle.

use racket_tournament_web::{
    generator_for, BracketContext, BracketKind, Format, MatchStatus, SetScore, Phase, Stage,
    StandingEntry, Tournament, TournamentError,
};

fn tournament(n: usize, format: Format) -> Tournament {
    let mut t = Tournament::new("Club Open", format);
    for i in 0..n {
        t.add_competitor(format!("P{}", i + 1)).unwrap();
    }
    t
}

/// Play every scheduled match, side A winning 2-0.
fn play_all(t: &mut Tournament) {
    while let Some(id) = t
        .matches
        .iter()
        .find(|m| m.status == MatchStatus::Scheduled)
        .map(|m| m.id)
    {
        t.record_result(id, vec![SetScore::new(21, 10), SetScore::new(21, 12)])
            .unwrap();
    }
}

/// Play every scheduled pool match with a pool-dependent margin, so
/// cross-pool comparisons (qualifier seeding) never tie.
fn play_pools(t: &mut Tournament) {
    while let Some((id, pool)) = t
        .matches
        .iter()
        .find(|m| m.status == MatchStatus::Scheduled && m.pool.is_some())
        .map(|m| (m.id, m.pool.unwrap_or(0)))
    {
        let losing = 5 + pool as u32;
        t.record_result(id, vec![SetScore::new(21, losing), SetScore::new(21, losing)])
            .unwrap();
    }
}

fn count_stage(t: &Tournament, stage: Stage) -> usize {
    t.matches.iter().filter(|m| m.stage == Some(stage)).count()
}

#[test]
fn fixed_four_full_run() {
    let mut t = tournament(16, Format::default());
    let plan = t.start().unwrap();
    assert_eq!(plan.pool_count, 4);
    assert_eq!(t.phase, Phase::PoolPhase);
    assert_eq!(t.matches.len(), 24);
    assert_eq!(t.expected_match_count(), 36);

    // The preview shows the skeleton without touching state.
    let preview = t.bracket_preview().unwrap();
    assert_eq!(preview.len(), 12);
    assert_eq!(t.matches.len(), 24);

    assert_eq!(t.generate_bracket(), Err(TournamentError::PoolPhaseIncomplete));

    play_all(&mut t);
    assert!(t.pool_phase_complete());
    t.generate_bracket().unwrap();
    assert_eq!(t.phase, Phase::Knockout);
    assert_eq!(t.matches.len(), 36);
    assert_eq!(count_stage(&t, Stage::Intermediate), 4);
    assert_eq!(count_stage(&t, Stage::QuarterFinal), 4);
    assert_eq!(count_stage(&t, Stage::SemiFinal), 2);
    assert_eq!(count_stage(&t, Stage::ThirdPlace), 1);
    assert_eq!(count_stage(&t, Stage::Final), 1);

    // Pool winners are already bound; their quarterfinals still wait for
    // the intermediate round.
    for m in t.matches.iter().filter(|m| m.stage == Some(Stage::QuarterFinal)) {
        assert!(m.slot_a.competitor().is_some());
        assert_eq!(m.status, MatchStatus::Pending);
    }
    for m in t.matches.iter().filter(|m| m.stage == Some(Stage::Intermediate)) {
        assert_eq!(m.status, MatchStatus::Scheduled);
    }

    play_all(&mut t);
    assert_eq!(t.phase, Phase::Completed);
    let placements = t.final_placements();
    assert_eq!(
        placements.iter().map(|&(r, _)| r).collect::<Vec<u32>>(),
        vec![1, 2, 3, 4]
    );
    // The champion is a real competitor.
    assert!(t.get_competitor(placements[0].1).is_some());
}

#[test]
fn fixed_four_without_third_place() {
    let format = Format {
        third_place_match: false,
        ..Format::default()
    };
    let mut t = tournament(16, format);
    t.start().unwrap();
    assert_eq!(t.expected_match_count(), 35);
    play_all(&mut t);
    t.generate_bracket().unwrap();
    assert_eq!(count_stage(&t, Stage::ThirdPlace), 0);
    play_all(&mut t);
    assert_eq!(t.phase, Phase::Completed);
    let ranks: Vec<u32> = t.final_placements().iter().map(|&(r, _)| r).collect();
    assert_eq!(ranks, vec![1, 2]);
}

#[test]
fn general_bracket_five_pools() {
    let format = Format {
        bracket: BracketKind::General,
        ..Format::default()
    };
    let mut t = tournament(20, format);
    let plan = t.start().unwrap();
    assert_eq!(plan.pool_count, 5);
    assert_eq!(t.matches.len(), 30);

    play_pools(&mut t);
    t.generate_bracket().unwrap();
    assert_eq!(t.matches.len(), 38);
    assert_eq!(count_stage(&t, Stage::QuarterFinal), 4);

    // 5 winners plus 3 best runners-up fill all 8 slots; every
    // quarterfinal is immediately playable.
    for m in t.matches.iter().filter(|m| m.stage == Some(Stage::QuarterFinal)) {
        assert_eq!(m.status, MatchStatus::Scheduled);
    }

    play_all(&mut t);
    assert_eq!(t.phase, Phase::Completed);
    let ranks: Vec<u32> = t.final_placements().iter().map(|&(r, _)| r).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4]);
}

#[test]
fn general_bracket_two_pools_crosses_semifinals() {
    let format = Format {
        bracket: BracketKind::General,
        ..Format::default()
    };
    let mut t = tournament(8, format);
    let plan = t.start().unwrap();
    assert_eq!(plan.pool_count, 2);

    play_all(&mut t);
    t.generate_bracket().unwrap();
    let knockout: Vec<_> = t.matches.iter().filter(|m| m.pool.is_none()).collect();
    assert_eq!(knockout.len(), 4);
    assert_eq!(count_stage(&t, Stage::SemiFinal), 2);

    // Crossed seeding: each semifinal pairs a winner with the other
    // pool's runner-up.
    let standings = t.all_standings();
    let semis: Vec<_> = t
        .matches
        .iter()
        .filter(|m| m.stage == Some(Stage::SemiFinal))
        .collect();
    assert_eq!(semis[0].slot_a.competitor(), Some(standings[0][0].competitor));
    assert_eq!(semis[0].slot_b.competitor(), Some(standings[1][1].competitor));
    assert_eq!(semis[1].slot_a.competitor(), Some(standings[1][0].competitor));
    assert_eq!(semis[1].slot_b.competitor(), Some(standings[0][1].competitor));

    play_all(&mut t);
    assert_eq!(t.phase, Phase::Completed);
}

#[test]
fn qualifier_cut_tie_is_reported_not_invented() {
    fn entry(points: u32, points_won: u32, points_lost: u32) -> StandingEntry {
        let mut e = StandingEntry::new(uuid::Uuid::new_v4());
        e.points = points;
        e.points_won = points_won;
        e.points_lost = points_lost;
        e
    }

    let ctx = BracketContext {
        pool_count: 6,
        pool_sizes: vec![3; 6],
        next_number: 1,
        first_round: 1,
        third_place_match: true,
        with_referees: false,
    };
    let generator = generator_for(BracketKind::General, 6);
    let mut skeleton = generator.skeleton(&ctx);
    assert_eq!(skeleton.len(), 8);

    // Six winners leave two qualifier slots for six runners-up; the
    // second and third best runners-up tie on points and differential.
    let runner_diffs = [10u32, 5, 5, 3, 2, 1];
    let pools: Vec<Vec<StandingEntry>> = (0..6)
        .map(|p| {
            vec![
                entry(2, 126, 60 + p as u32),
                entry(1, 80 + runner_diffs[p], 80),
                entry(0, 40, 126),
            ]
        })
        .collect();

    let result = generator.populate(&mut skeleton, &pools);
    assert!(matches!(
        result,
        Err(TournamentError::UnresolvedQualifierTie { .. })
    ));
}

#[test]
fn shortened_main_resolves_every_rank() {
    let format = Format {
        bracket: BracketKind::ShortenedMain,
        ..Format::default()
    };
    let mut t = tournament(16, format);
    t.start().unwrap();
    assert_eq!(t.expected_match_count(), 48);

    play_all(&mut t);
    t.generate_bracket().unwrap();
    let knockout = t.matches.iter().filter(|m| m.pool.is_none()).count();
    assert_eq!(knockout, 24);
    assert_eq!(count_stage(&t, Stage::Qualification), 4);
    // Third-place match is part of the topology regardless of the flag.
    assert_eq!(count_stage(&t, Stage::ThirdPlace), 1);

    let terminal_ranks: Vec<u32> = t.matches.iter().filter_map(|m| m.contested_rank).collect();
    assert_eq!(terminal_ranks.len(), 8);

    play_all(&mut t);
    assert_eq!(t.phase, Phase::Completed);
    let placements = t.final_placements();
    assert_eq!(
        placements.iter().map(|&(r, _)| r).collect::<Vec<u32>>(),
        (1..=16).collect::<Vec<u32>>()
    );
    // Every competitor lands on exactly one rank.
    let mut ranked: Vec<_> = placements.iter().map(|&(_, id)| id).collect();
    ranked.sort();
    ranked.dedup();
    assert_eq!(ranked.len(), 16);
}

//! Integration tests for the tournament lifecycle: setup, phase gating,
//! and result entry errors.

use racket_tournament_web::{
    BracketKind, Format, MatchStatus, Phase, ScoreError, SeedingMethod, SetScore, Slot,
    Tournament, TournamentError,
};

fn tournament(n: usize, format: Format) -> Tournament {
    let mut t = Tournament::new("Club Open", format);
    for i in 0..n {
        t.add_competitor(format!("P{}", i + 1)).unwrap();
    }
    t
}

#[test]
fn names_are_unique_case_insensitive() {
    let mut t = Tournament::new("Club Open", Format::default());
    t.add_competitor("Alice").unwrap();
    assert_eq!(
        t.add_competitor("alice"),
        Err(TournamentError::DuplicateCompetitorName)
    );
    assert_eq!(
        t.add_competitor("  ALICE "),
        Err(TournamentError::DuplicateCompetitorName)
    );
    t.add_competitor("Bob").unwrap();
    assert_eq!(t.competitors.len(), 2);
}

#[test]
fn removal_keeps_seeds_dense() {
    let mut t = tournament(4, Format::default());
    let second = t.competitors[1].id;
    t.remove_competitor(second).unwrap();
    let seeds: Vec<u32> = t.competitors.iter().map(|c| c.seed).collect();
    assert_eq!(seeds, vec![1, 2, 3]);
}

#[test]
fn reorder_replaces_the_whole_seeding() {
    let mut t = tournament(3, Format::default());
    let order: Vec<_> = t.competitors.iter().rev().map(|c| c.id).collect();
    t.reorder_seeds(&order).unwrap();
    assert_eq!(t.competitors[0].seed, 3);
    assert_eq!(t.competitors[2].seed, 1);

    // Partial or duplicated orders are rejected.
    assert!(t.reorder_seeds(&order[..2]).is_err());
    let dup = vec![order[0], order[0], order[1]];
    assert!(t.reorder_seeds(&dup).is_err());
}

#[test]
fn roster_freezes_once_started() {
    let mut t = tournament(16, Format::default());
    t.start().unwrap();
    assert_eq!(t.phase, Phase::PoolPhase);
    assert_eq!(t.add_competitor("Late"), Err(TournamentError::InvalidPhase));
    let id = t.competitors[0].id;
    assert_eq!(t.remove_competitor(id), Err(TournamentError::InvalidPhase));
    assert_eq!(
        t.set_format(Format::default()),
        Err(TournamentError::InvalidPhase)
    );
    // Renames stay possible during play.
    t.rename_competitor(id, "Renamed").unwrap();
    assert_eq!(t.get_competitor(id).unwrap().name, "Renamed");
}

#[test]
fn start_rejects_bracket_pool_mismatch() {
    // 8 competitors in pools of 4 make 2 pools; the fixed bracket needs 4.
    let mut t = tournament(8, Format::default());
    assert!(matches!(
        t.start(),
        Err(TournamentError::BracketPoolMismatch { pool_count: 2, .. })
    ));
    assert_eq!(t.phase, Phase::Setup);
}

#[test]
fn manual_seeding_uses_the_assigned_pools() {
    let format = Format {
        seeding: SeedingMethod::Manual,
        bracket: BracketKind::General,
        ..Format::default()
    };
    let mut t = tournament(8, format);
    let ids: Vec<_> = t.competitors.iter().map(|c| c.id).collect();
    t.assign_pools(vec![ids[..4].to_vec(), ids[4..].to_vec()])
        .unwrap();
    t.start().unwrap();
    assert_eq!(t.groups.len(), 2);
    assert_eq!(t.groups[0].members, ids[..4].to_vec());
}

#[test]
fn manual_seeding_without_pools_is_rejected() {
    let format = Format {
        seeding: SeedingMethod::Manual,
        bracket: BracketKind::General,
        ..Format::default()
    };
    let mut t = tournament(8, format);
    assert_eq!(t.start(), Err(TournamentError::PoolsNotAssigned));
}

#[test]
fn unknown_match_ids_are_reported() {
    let mut t = tournament(16, Format::default());
    t.start().unwrap();
    let ghost = uuid::Uuid::new_v4();
    assert_eq!(
        t.record_result(ghost, vec![SetScore::new(21, 10)]),
        Err(TournamentError::MatchNotFound(ghost))
    );
    assert_eq!(
        t.mark_in_progress(ghost),
        Err(TournamentError::MatchNotFound(ghost))
    );
}

#[test]
fn invalid_scores_leave_the_match_untouched() {
    let mut t = tournament(16, Format::default());
    t.start().unwrap();
    let id = t.matches[0].id;

    let err = t
        .record_result(id, vec![SetScore::new(21, 20), SetScore::new(21, 10)])
        .unwrap_err();
    assert_eq!(err, TournamentError::Score(ScoreError::MarginAtCap { cap: 21 }));
    assert_eq!(t.matches[0].status, MatchStatus::Scheduled);
    assert!(t.matches[0].sets.is_empty());
    assert_eq!(t.matches[0].winner, None);
}

#[test]
fn results_cannot_be_resubmitted() {
    let mut t = tournament(16, Format::default());
    t.start().unwrap();
    let id = t.matches[0].id;
    let sets = vec![SetScore::new(21, 10), SetScore::new(21, 12)];
    t.record_result(id, sets.clone()).unwrap();
    assert_eq!(
        t.record_result(id, sets),
        Err(TournamentError::MatchAlreadyDecided(id))
    );
}

#[test]
fn unready_knockout_matches_reject_results() {
    let mut t = tournament(16, Format::default());
    t.start().unwrap();
    while let Some(id) = t
        .matches
        .iter()
        .find(|m| m.status == MatchStatus::Scheduled)
        .map(|m| m.id)
    {
        t.record_result(id, vec![SetScore::new(21, 10), SetScore::new(21, 12)])
            .unwrap();
    }
    t.generate_bracket().unwrap();

    let pending = t
        .matches
        .iter()
        .find(|m| m.status == MatchStatus::Pending)
        .map(|m| m.id)
        .unwrap();
    assert_eq!(
        t.record_result(pending, vec![SetScore::new(21, 10), SetScore::new(21, 12)]),
        Err(TournamentError::MatchNotReady(pending))
    );
}

#[test]
fn in_progress_marking() {
    let mut t = tournament(16, Format::default());
    t.start().unwrap();
    let id = t.matches[0].id;
    t.mark_in_progress(id).unwrap();
    assert_eq!(t.matches[0].status, MatchStatus::InProgress);
    // In-progress matches still accept their final score.
    t.record_result(id, vec![SetScore::new(21, 10), SetScore::new(21, 12)])
        .unwrap();
    assert_eq!(t.mark_in_progress(id), Err(TournamentError::MatchAlreadyDecided(id)));
}

#[test]
fn slot_labels_read_naturally() {
    let mut t = tournament(16, Format::default());
    t.start().unwrap();
    assert_eq!(t.slot_label(&Slot::Bye), "Bye");
    assert_eq!(t.slot_label(&Slot::pool_rank(0, 2)), "Group A #2");
    assert_eq!(t.slot_label(&Slot::Qualifier { seed: 3 }), "Qualifier 3");
    let first = t.matches[0].id;
    assert_eq!(t.slot_label(&Slot::winner_of(first)), "Winner of match 1");
    let id = t.competitors[0].id;
    assert_eq!(t.slot_label(&Slot::Competitor { id }), t.competitors[0].name);
}

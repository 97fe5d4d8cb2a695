//! Racket tournament engine: pool seeding, round-robin scheduling,
//! standings, knockout bracket generation, and result propagation, with a
//! web shell in `src/bin/web.rs`.

pub mod logic;
pub mod models;

pub use logic::{
    circle_rounds, dependents_of, generator_for, plan_pools, pool_phase_match_count,
    pool_standings, propagate_result, random_draft, resolve_all_byes, resolve_byes,
    schedule_pool_phase, snake_draft, validate_distribution, validate_set, winning_side,
    BracketContext, BracketGenerator, DistributionPlan, ScoreError, SeedingError, Side,
};
pub use models::{
    bracket_supports, BracketKind, Competitor, CompetitorId, Format, Group, GroupId, Match,
    MatchId, MatchStatus, Outcome, Phase, Placement, SeedingMethod, SetScore, Slot, Stage,
    StandingEntry, Tiebreak, Tournament, TournamentError, TournamentId,
};
